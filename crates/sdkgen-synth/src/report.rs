//! Generation report aggregating every placement decision of a run.

use std::fmt;
use std::path::PathBuf;

use sdkgen_model::LoadFailure;

/// Why a proposed artifact was not written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The path already exists on disk and is trusted as-is.
    Existing,
    /// The host environment cannot create symbolic links.
    LinksUnsupported,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Existing => write!(f, "already exists"),
            SkipReason::LinksUnsupported => write!(f, "links unsupported"),
        }
    }
}

/// Summary of one synthesis run.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Artifacts written this run, in placement order.
    pub generated: Vec<PathBuf>,
    /// Artifacts proposed but not written, with reasons.
    pub skipped: Vec<(PathBuf, SkipReason)>,
    /// Artifacts whose write failed; the run continued past each.
    pub failed: Vec<(PathBuf, String)>,
    /// Descriptor files excluded during loading.
    pub load_failures: Vec<LoadFailure>,
    /// Descriptors that loaded but contributed no artifacts, with reasons.
    pub descriptors_skipped: Vec<(String, String)>,
}

impl GenerationReport {
    /// Whether this run left the tree untouched.
    pub fn wrote_nothing(&self) -> bool {
        self.generated.is_empty()
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Generation Report ===")?;

        writeln!(f, "Generated: {} artifact(s)", self.generated.len())?;
        for path in &self.generated {
            writeln!(f, "  {}", path.display())?;
        }

        if !self.skipped.is_empty() {
            writeln!(f, "Skipped: {} artifact(s)", self.skipped.len())?;
            for (path, reason) in &self.skipped {
                writeln!(f, "  {} ({reason})", path.display())?;
            }
        }

        if !self.failed.is_empty() {
            writeln!(f, "Failed: {} artifact(s)", self.failed.len())?;
            for (path, reason) in &self.failed {
                writeln!(f, "  {} ({reason})", path.display())?;
            }
        }

        if !self.descriptors_skipped.is_empty() {
            writeln!(f, "Descriptors skipped: {}", self.descriptors_skipped.len())?;
            for (name, reason) in &self.descriptors_skipped {
                writeln!(f, "  {name} ({reason})")?;
            }
        }

        if !self.load_failures.is_empty() {
            writeln!(f, "Load failures: {}", self.load_failures.len())?;
            for failure in &self.load_failures {
                writeln!(f, "  {} ({})", failure.path.display(), failure.reason)?;
            }
        }

        Ok(())
    }
}
