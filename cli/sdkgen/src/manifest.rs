//! `sdkgen.toml` manifest parsing and project configuration.
//!
//! The manifest is optional; without one the generator runs with built-in
//! defaults (descriptors in `cmake_configs/`, the standard naming scheme,
//! the default architecture table). Command-line flags override manifest
//! values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use sdkgen_model::{ArchRule, ArchTable, NamingScheme};

/// The top-level manifest structure for a generator project.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SdkgenManifest {
    /// Path configuration.
    #[serde(default)]
    pub paths: Option<PathsConfig>,
    /// Naming-scheme overrides.
    #[serde(default)]
    pub naming: Option<NamingScheme>,
    /// Architecture classifier overrides.
    #[serde(default)]
    pub arch: Option<ArchConfig>,
}

/// Paths section.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// Descriptor directory, relative to the manifest's directory.
    #[serde(default)]
    pub configs: Option<String>,
}

/// Architecture classifier section.
#[derive(Debug, Clone, Deserialize)]
pub struct ArchConfig {
    /// Prefix rules replacing the built-in table when non-empty.
    #[serde(default)]
    pub rules: Vec<ArchRule>,
}

impl SdkgenManifest {
    /// Search upward from `start_dir` for a `sdkgen.toml` file, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join("sdkgen.toml");
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: SdkgenManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing sdkgen.toml")
    }

    /// Naming scheme, falling back to the built-in defaults.
    pub fn naming(&self) -> NamingScheme {
        self.naming.clone().unwrap_or_default()
    }

    /// Architecture table, falling back to the built-in rules.
    pub fn arch_table(&self) -> ArchTable {
        match &self.arch {
            Some(arch) if !arch.rules.is_empty() => ArchTable::new(arch.rules.clone()),
            _ => ArchTable::default(),
        }
    }

    /// Configured descriptor directory name, if any.
    pub fn configs_dir(&self) -> Option<&str> {
        self.paths.as_ref().and_then(|p| p.configs.as_deref())
    }
}
