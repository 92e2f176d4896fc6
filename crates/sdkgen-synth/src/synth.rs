//! Tree synthesis: generation order and the non-destructive policy.
//!
//! Order is fixed: root project, shared toolchain, then per chip its
//! toolchain file, project subtree, demo subtrees and root shortcut, then
//! the menu tree, then the variable map. Root artifacts therefore always
//! precede per-chip artifacts, and both per-chip artifacts of a chip are
//! placed before its menu entry exists, which is what keeps the chip set
//! identical across the project tree, the menu tree, and the toolchain
//! tree.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use sdkgen_emit::{menu, project, toolchain};
use sdkgen_model::{ArchTable, ChipIdentity, LoadOutcome, TargetDescriptor};

use crate::context::{RunContext, Singleton};
use crate::error::SynthError;
use crate::report::{GenerationReport, SkipReason};
use crate::store::{ArtifactStore, LinkError};

/// Synthesize the whole artifact tree for a loaded descriptor set.
///
/// Fails only when nothing loadable was supplied; every narrower problem is
/// recorded in the returned report and the run continues.
pub fn synthesize<S: ArtifactStore>(
    store: &mut S,
    outcome: &LoadOutcome,
    table: &ArchTable,
) -> Result<GenerationReport, SynthError> {
    if outcome.is_empty() {
        return Err(SynthError::NoDescriptors);
    }

    let mut report = GenerationReport {
        load_failures: outcome.failures.clone(),
        ..GenerationReport::default()
    };

    // A descriptor with no usable targets contributes no artifacts at all,
    // so it is excluded from the chip set before anything is written.
    let mut covered: Vec<(ChipIdentity, &TargetDescriptor)> = Vec::new();
    for (source_id, descriptor) in &outcome.descriptors {
        if !descriptor.has_targets() {
            log::info!("descriptor '{source_id}' has no usable targets, skipping its artifacts");
            report
                .descriptors_skipped
                .push((source_id.clone(), "no usable targets".into()));
            continue;
        }
        covered.push((ChipIdentity::new(source_id.clone(), table), descriptor));
    }

    let chips: Vec<ChipIdentity> = covered.iter().map(|(chip, _)| chip.clone()).collect();
    let demo_names: BTreeSet<String> = covered
        .iter()
        .flat_map(|(_, descriptor)| descriptor.target_names().map(str::to_string))
        .collect();

    let mut synth = Synthesizer {
        store,
        ctx: RunContext::new(),
        report,
    };

    synth.place_singleton(
        Singleton::RootProject,
        Path::new("CMakeLists.txt"),
        &project::root_project(&chips),
    );
    synth.place_singleton(
        Singleton::SharedToolchain,
        Path::new("cmake/toolchain.cmake"),
        &toolchain::shared_toolchain(&chips),
    );

    for (chip, descriptor) in &covered {
        synth.place_chip(chip, descriptor);
    }

    synth.place_singleton(Singleton::RootMenu, Path::new("Kconfig"), &menu::root_menu());
    synth.place_singleton(
        Singleton::ChipMenu,
        Path::new("chip/Kconfig"),
        &menu::chip_menu(&chips),
    );
    synth.place_singleton(
        Singleton::DemoMenu,
        Path::new("demo/Kconfig"),
        &menu::demo_menu(&demo_names),
    );
    synth.place_singleton(
        Singleton::ToolchainMenu,
        Path::new("tools/Kconfig"),
        &menu::toolchain_menu(),
    );
    synth.place_singleton(
        Singleton::VariableMap,
        Path::new("cmake/kconfig.cmake"),
        &menu::variable_map(&chips),
    );

    Ok(synth.report)
}

struct Synthesizer<'a, S: ArtifactStore> {
    store: &'a mut S,
    ctx: RunContext,
    report: GenerationReport,
}

impl<S: ArtifactStore> Synthesizer<'_, S> {
    /// Emit a singleton artifact, at most once per run.
    ///
    /// The guard is the run context, not the filesystem: singleton content
    /// is recomputed from the full current model, so it replaces any stale
    /// copy from an earlier run.
    fn place_singleton(&mut self, which: Singleton, path: &Path, content: &str) {
        if !self.ctx.claim(which) {
            return;
        }
        self.write(path, content);
    }

    /// Emit an artifact only where no file exists yet.
    ///
    /// An existing file is trusted as-is, with no content comparison; this
    /// protects hand-edits at the cost of silent staleness.
    fn place_fresh(&mut self, path: &Path, content: &str) {
        if self.store.exists(path) {
            log::info!("already exists, skipping: {}", path.display());
            self.report
                .skipped
                .push((path.to_path_buf(), SkipReason::Existing));
            return;
        }
        self.write(path, content);
    }

    fn write(&mut self, path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = self.store.create_dir_all(parent) {
                    log::warn!("creating {} failed: {e}", parent.display());
                    self.report
                        .failed
                        .push((path.to_path_buf(), format!("creating parent: {e}")));
                    return;
                }
            }
        }
        match self.store.write(path, content) {
            Ok(()) => {
                log::info!("generated {}", path.display());
                self.report.generated.push(path.to_path_buf());
            }
            Err(e) => {
                log::warn!("writing {} failed: {e}", path.display());
                self.report.failed.push((path.to_path_buf(), e.to_string()));
            }
        }
    }

    /// Per-chip artifacts: toolchain file, project subtree, demo subtrees,
    /// and the root shortcut.
    fn place_chip(&mut self, chip: &ChipIdentity, descriptor: &TargetDescriptor) {
        let toolchain_path = PathBuf::from(format!("cmake/toolchain_{}.cmake", chip.file_stem()));
        self.place_fresh(&toolchain_path, &toolchain::chip_toolchain(chip));

        let chip_project_path = Path::new("chip")
            .join(&chip.canonical_name)
            .join("CMakeLists.txt");
        self.place_fresh(&chip_project_path, &project::chip_project(chip));

        for spec in &descriptor.targets {
            let demo_path = Path::new("demo/vendor")
                .join(&spec.name)
                .join("CMakeLists.txt");
            self.place_fresh(&demo_path, &project::target_project(chip, spec));
        }

        self.place_shortcut(chip, &chip_project_path);
    }

    /// Convenience shortcut at the tree root. Optional affordance: skipped
    /// wholesale where the store cannot link, never a failure.
    fn place_shortcut(&mut self, chip: &ChipIdentity, target: &Path) {
        let link = PathBuf::from(format!("CMakeLists_{}.txt", chip.canonical_name));
        if !self.store.supports_links() {
            log::info!("links unsupported, skipping shortcut {}", link.display());
            self.report
                .skipped
                .push((link, SkipReason::LinksUnsupported));
            return;
        }
        if self.store.exists(&link) {
            log::info!("already exists, skipping: {}", link.display());
            self.report.skipped.push((link, SkipReason::Existing));
            return;
        }
        match self.store.symlink(target, &link) {
            Ok(()) => {
                log::info!("linked {}", link.display());
                self.report.generated.push(link);
            }
            Err(LinkError::Unsupported) => {
                self.report
                    .skipped
                    .push((link, SkipReason::LinksUnsupported));
            }
            Err(LinkError::Io(e)) => {
                log::warn!("linking {} failed: {e}", link.display());
                self.report.failed.push((link, e.to_string()));
            }
        }
    }
}
