//! Descriptor and target specification types.
//!
//! `RawDescriptor`/`RawTargetSpec` mirror the on-disk JSON shape and accept
//! anything structurally valid. `TargetDescriptor`/`TargetSpec` are the
//! validated forms the rest of the generator consumes: every target has a
//! name, names are unique within their descriptor, and the whole structure is
//! immutable after load.

use serde::Deserialize;

/// On-disk form of a descriptor file.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDescriptor {
    /// Buildable targets, in declaration order.
    #[serde(default)]
    pub targets: Vec<RawTargetSpec>,
}

/// On-disk form of one target entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTargetSpec {
    /// Target name; entries without one are skipped during validation.
    #[serde(default)]
    pub name: Option<String>,
    /// Source directories, order preserved.
    #[serde(default)]
    pub directories: Vec<String>,
    #[serde(default)]
    pub linker_options: Option<Vec<String>>,
    #[serde(default)]
    pub linker_libraries: Option<Vec<String>>,
    #[serde(default)]
    pub pre_build: Option<Vec<String>>,
    #[serde(default)]
    pub post_build: Option<Vec<String>>,
}

/// One buildable program within a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    /// Target name, used as directory and project name.
    pub name: String,
    /// Source directories in verbatim declaration order.
    pub directories: Vec<String>,
    /// Linker options; `None` means the block is omitted from output.
    pub linker_options: Option<Vec<String>>,
    /// Libraries to link; `None` means the block is omitted from output.
    pub linker_libraries: Option<Vec<String>>,
    /// Pre-build hook commands.
    pub pre_build: Option<Vec<String>>,
    /// Post-build hook commands.
    pub post_build: Option<Vec<String>>,
}

/// One chip's buildable targets, keyed by its canonical chip name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDescriptor {
    /// Canonical chip name, unique within a run.
    pub source_id: String,
    /// Validated targets, declaration order preserved.
    pub targets: Vec<TargetSpec>,
}

impl TargetDescriptor {
    /// Validate a raw descriptor under the given canonical identifier.
    ///
    /// Unnamed entries and duplicate names (first declaration wins) are
    /// dropped with a warning rather than failing the descriptor.
    pub fn from_raw(source_id: String, raw: RawDescriptor) -> Self {
        let mut targets: Vec<TargetSpec> = Vec::with_capacity(raw.targets.len());
        for (index, entry) in raw.targets.into_iter().enumerate() {
            let Some(name) = entry.name else {
                log::warn!("{source_id}: target #{index} has no name, skipping");
                continue;
            };
            if targets.iter().any(|t| t.name == name) {
                log::warn!("{source_id}: duplicate target name '{name}', keeping first");
                continue;
            }
            targets.push(TargetSpec {
                name,
                directories: entry.directories,
                linker_options: entry.linker_options,
                linker_libraries: entry.linker_libraries,
                pre_build: entry.pre_build,
                post_build: entry.post_build,
            });
        }
        Self { source_id, targets }
    }

    /// Whether this descriptor contributes any artifacts at all.
    pub fn has_targets(&self) -> bool {
        !self.targets.is_empty()
    }

    /// Names of all validated targets, in declaration order.
    pub fn target_names(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(|t| t.name.as_str())
    }
}
