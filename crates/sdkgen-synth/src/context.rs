//! Run-scoped generation context.

use std::collections::BTreeSet;

/// Artifacts emitted at most once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Singleton {
    RootProject,
    SharedToolchain,
    RootMenu,
    ChipMenu,
    DemoMenu,
    ToolchainMenu,
    VariableMap,
}

/// Tracks which singleton artifacts the current run has already emitted.
///
/// The guard is purely in-memory and scoped to one invocation: a singleton
/// file deleted mid-run is not regenerated within the same pass, and no
/// state outlives the run.
#[derive(Debug, Default)]
pub struct RunContext {
    emitted: BTreeSet<Singleton>,
}

impl RunContext {
    /// Fresh context with nothing emitted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a singleton for emission. Returns `true` only the first time.
    pub fn claim(&mut self, singleton: Singleton) -> bool {
        self.emitted.insert(singleton)
    }
}
