//! Synthesis errors.

use thiserror::Error;

/// Fatal conditions for a whole synthesis run.
///
/// Per-artifact problems are never fatal; they are recorded in the
/// generation report and the run continues.
#[derive(Debug, Error)]
pub enum SynthError {
    /// Nothing loadable was found; surfaced explicitly instead of silently
    /// producing an empty tree.
    #[error("no loadable descriptors; nothing to generate")]
    NoDescriptors,
}
