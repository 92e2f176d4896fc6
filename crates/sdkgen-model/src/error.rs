//! Error types for model loading and identifier derivation.

use thiserror::Error;

/// Errors that can occur while loading and normalizing descriptors.
#[derive(Debug, Error)]
pub enum ModelError {
    /// I/O error reading descriptor files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stripping the family prefix and suffix left nothing of the name.
    #[error("cannot derive a chip identifier from '{raw}': stripped name is empty")]
    EmptyIdentifier {
        /// The raw source name the derivation started from.
        raw: String,
    },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
