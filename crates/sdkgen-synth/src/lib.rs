//! Build-tree synthesis.
//!
//! The synthesizer walks the loaded model in a fixed order (root artifacts,
//! then per-chip artifacts, then the menu tree and variable map) and applies
//! one placement policy to everything: singletons are emitted at most once
//! per run, everything else only where no file exists yet. Writers propose
//! content; the synthesizer alone decides whether it lands on disk.

pub mod context;
pub mod error;
pub mod report;
pub mod store;
pub mod synth;

pub use context::{RunContext, Singleton};
pub use error::SynthError;
pub use report::{GenerationReport, SkipReason};
pub use store::{ArtifactStore, DiskStore, DryRunStore, LinkError, MemStore};
pub use synth::synthesize;
