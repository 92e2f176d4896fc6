//! Architecture classification.
//!
//! Chips sharing a compiler, assembler, linker, and flag set form one
//! architecture class. Classification is a prefix match over the canonical
//! chip name against an injectable rule table; a name matching no rule is
//! `Unclassified`, which is an explicit gap (the chip still gets a toolchain
//! file, just without tool bindings), not a failure.

use serde::{Deserialize, Serialize};

use crate::ident::option_symbol;

/// Closed set of architecture classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchClass {
    /// TC32 proprietary core, `tc32-elf-*` tools.
    Tc32,
    /// RV32 core, `riscv32-elf-*` tools.
    RiscV,
    /// No recognized prefix; toolchain file carries no tool bindings.
    Unclassified,
}

impl std::fmt::Display for ArchClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArchClass::Tc32 => write!(f, "tc32"),
            ArchClass::RiscV => write!(f, "riscv"),
            ArchClass::Unclassified => write!(f, "unclassified"),
        }
    }
}

/// One prefix → class rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchRule {
    /// Canonical-name prefix to match.
    pub prefix: String,
    /// Class assigned on match.
    pub class: ArchClass,
}

/// Ordered classifier table; first matching rule wins.
#[derive(Debug, Clone)]
pub struct ArchTable {
    rules: Vec<ArchRule>,
}

impl Default for ArchTable {
    fn default() -> Self {
        Self {
            rules: vec![
                ArchRule {
                    prefix: "TC".into(),
                    class: ArchClass::Tc32,
                },
                ArchRule {
                    prefix: "TL".into(),
                    class: ArchClass::RiscV,
                },
            ],
        }
    }
}

impl ArchTable {
    /// Build a table from explicit rules.
    pub fn new(rules: Vec<ArchRule>) -> Self {
        Self { rules }
    }

    /// Classify a canonical chip name.
    pub fn classify(&self, canonical_name: &str) -> ArchClass {
        self.rules
            .iter()
            .find(|r| canonical_name.starts_with(&r.prefix))
            .map(|r| r.class)
            .unwrap_or(ArchClass::Unclassified)
    }
}

/// Derived chip identity: canonical name plus architecture class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipIdentity {
    /// Canonical chip name, display case preserved.
    pub canonical_name: String,
    /// Architecture class resolved from the name prefix.
    pub arch: ArchClass,
}

impl ChipIdentity {
    /// Resolve an identity for a canonical name against a classifier table.
    pub fn new(canonical_name: impl Into<String>, table: &ArchTable) -> Self {
        let canonical_name = canonical_name.into();
        let arch = table.classify(&canonical_name);
        Self {
            canonical_name,
            arch,
        }
    }

    /// Build-option symbol for this chip, e.g. `CHIP_B92`.
    pub fn option_symbol(&self) -> String {
        option_symbol("CHIP_", &self.canonical_name)
    }

    /// Lower-cased form used in toolchain file names.
    pub fn file_stem(&self) -> String {
        self.canonical_name.to_ascii_lowercase()
    }
}
