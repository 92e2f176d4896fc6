//! Canonical chip identifier derivation.
//!
//! Every generated artifact keys off the canonical chip name, so derivation
//! must be a pure function of the raw source name: same input, same output,
//! on every run. Display case is preserved; symbolic build-option names use
//! the upper-cased form.

use serde::Deserialize;

use crate::error::{ModelError, Result};

/// Family prefix and suffix tokens stripped from descriptor file stems.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NamingScheme {
    /// Family prefix token, stripped when present.
    pub prefix: String,
    /// Suffix token, stripped when present.
    pub suffix: String,
}

impl Default for NamingScheme {
    fn default() -> Self {
        Self {
            prefix: "PLATFORM_SDK_".into(),
            suffix: "_cmake".into(),
        }
    }
}

impl NamingScheme {
    /// Derive the canonical chip name from a raw source name.
    ///
    /// Strips the family prefix and the suffix token where present. An empty
    /// result is a derivation error, never a silently empty identifier.
    pub fn derive(&self, raw: &str) -> Result<String> {
        let stripped = raw.strip_prefix(&self.prefix).unwrap_or(raw);
        let stripped = stripped.strip_suffix(&self.suffix).unwrap_or(stripped);
        if stripped.is_empty() {
            return Err(ModelError::EmptyIdentifier { raw: raw.into() });
        }
        Ok(stripped.to_string())
    }

    /// File-name filter for descriptor discovery: `<anything><suffix>.json`.
    pub fn descriptor_file_suffix(&self) -> String {
        format!("{}.json", self.suffix)
    }
}

/// Upper-cased symbolic form of an identifier, e.g. `DEMO_` + `uart_demo`
/// becomes `DEMO_UART_DEMO`.
pub fn option_symbol(kind: &str, name: &str) -> String {
    format!("{kind}{}", name.to_ascii_uppercase())
}
