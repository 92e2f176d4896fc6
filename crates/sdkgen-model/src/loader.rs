//! Descriptor discovery and loading.
//!
//! Loading has partial-failure semantics: a malformed descriptor, an empty
//! derivation, or an identifier collision excludes that one file and is
//! reported; every other descriptor still loads. Nothing is written at this
//! stage, so all loads complete before any artifact is placed.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::descriptor::{RawDescriptor, TargetDescriptor};
use crate::error::Result;
use crate::ident::NamingScheme;

/// One descriptor that could not be loaded, and why.
#[derive(Debug, Clone)]
pub struct LoadFailure {
    /// Path of the offending file.
    pub path: PathBuf,
    /// Human-readable reason.
    pub reason: String,
}

/// Result of scanning a descriptor directory.
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    /// Successfully loaded descriptors, keyed by canonical chip name.
    ///
    /// A `BTreeMap` so every downstream consumer iterates chips in sorted
    /// order regardless of directory enumeration order.
    pub descriptors: BTreeMap<String, TargetDescriptor>,
    /// Files that were excluded, with reasons.
    pub failures: Vec<LoadFailure>,
}

impl LoadOutcome {
    /// Whether nothing loadable was found.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// Load every descriptor file in `dir` matching the naming scheme.
///
/// Returns an error only if the directory itself cannot be read; per-file
/// problems are collected into [`LoadOutcome::failures`].
pub fn load_dir(dir: &Path, naming: &NamingScheme) -> Result<LoadOutcome> {
    let file_suffix = naming.descriptor_file_suffix();

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
            if file_name.ends_with(&file_suffix) {
                files.push(path);
            }
        }
    }
    // Sorted scan keeps collision resolution and reporting deterministic.
    files.sort();

    let mut outcome = LoadOutcome::default();
    let mut claimed: BTreeMap<String, PathBuf> = BTreeMap::new();

    for path in files {
        let stem = match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => stem,
            None => {
                outcome.failures.push(LoadFailure {
                    reason: "file name is not valid UTF-8".into(),
                    path,
                });
                continue;
            }
        };

        let source_id = match naming.derive(stem) {
            Ok(id) => id,
            Err(e) => {
                outcome.failures.push(LoadFailure {
                    reason: e.to_string(),
                    path,
                });
                continue;
            }
        };

        if let Some(prev) = claimed.get(&source_id) {
            outcome.failures.push(LoadFailure {
                reason: format!(
                    "canonical identifier '{}' already derived from {}",
                    source_id,
                    prev.display()
                ),
                path,
            });
            continue;
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                outcome.failures.push(LoadFailure {
                    reason: format!("read failed: {e}"),
                    path,
                });
                continue;
            }
        };

        let raw: RawDescriptor = match serde_json::from_str(&content) {
            Ok(raw) => raw,
            Err(e) => {
                outcome.failures.push(LoadFailure {
                    reason: format!("invalid JSON: {e}"),
                    path,
                });
                continue;
            }
        };

        log::debug!("loaded descriptor {} as '{source_id}'", path.display());
        claimed.insert(source_id.clone(), path);
        outcome
            .descriptors
            .insert(source_id.clone(), TargetDescriptor::from_raw(source_id, raw));
    }

    Ok(outcome)
}
