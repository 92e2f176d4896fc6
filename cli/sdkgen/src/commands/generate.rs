//! `sdkgen generate` — materialize the build tree.

use std::path::Path;

use anyhow::{Context, Result};

use sdkgen_model::{load_dir, ArchTable, NamingScheme};
use sdkgen_synth::{synthesize, DiskStore, DryRunStore, GenerationReport};

/// Load descriptors from `configs` and synthesize the tree under `root`.
pub fn run(
    root: &Path,
    configs: &Path,
    naming: &NamingScheme,
    table: &ArchTable,
    dry_run: bool,
) -> Result<()> {
    let outcome = load_dir(configs, naming)
        .with_context(|| format!("reading descriptor directory {}", configs.display()))?;

    let report = if dry_run {
        let mut store = DryRunStore::new(DiskStore::new(root));
        synthesize(&mut store, &outcome, table)?
    } else {
        let mut store = DiskStore::new(root);
        synthesize(&mut store, &outcome, table)?
    };

    print_report(&report, dry_run);
    Ok(())
}

fn print_report(report: &GenerationReport, dry_run: bool) {
    print!("{report}");
    if dry_run {
        println!("Dry run: no files were written");
    } else if report.wrote_nothing() {
        println!("Tree already up to date; nothing written");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_descriptor(configs: &Path, file_name: &str, json: &str) {
        fs::create_dir_all(configs).unwrap();
        fs::write(configs.join(file_name), json).unwrap();
    }

    #[test]
    fn generate_creates_tree_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let configs = dir.path().join("cmake_configs");
        write_descriptor(
            &configs,
            "PLATFORM_SDK_B92_cmake.json",
            r#"{"targets": [{"name": "uart_demo", "directories": ["src"]}]}"#,
        );

        run(
            dir.path(),
            &configs,
            &NamingScheme::default(),
            &ArchTable::default(),
            false,
        )
        .unwrap();

        assert!(dir.path().join("CMakeLists.txt").is_file());
        assert!(dir.path().join("chip/B92/CMakeLists.txt").is_file());
        assert!(dir.path().join("demo/vendor/uart_demo/CMakeLists.txt").is_file());
        assert!(dir.path().join("cmake/toolchain_b92.cmake").is_file());
    }

    #[test]
    fn generate_fails_without_descriptors() {
        let dir = tempfile::tempdir().unwrap();
        let configs = dir.path().join("cmake_configs");
        fs::create_dir_all(&configs).unwrap();

        let result = run(
            dir.path(),
            &configs,
            &NamingScheme::default(),
            &ArchTable::default(),
            false,
        );
        assert!(result.is_err());
        assert!(!dir.path().join("CMakeLists.txt").exists());
    }

    #[test]
    fn generate_fails_on_missing_configs_dir() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(
            dir.path(),
            &dir.path().join("nonexistent"),
            &NamingScheme::default(),
            &ArchTable::default(),
            false,
        );
        assert!(result.is_err());
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let configs = dir.path().join("cmake_configs");
        write_descriptor(
            &configs,
            "PLATFORM_SDK_B92_cmake.json",
            r#"{"targets": [{"name": "uart_demo", "directories": ["src"]}]}"#,
        );

        run(
            dir.path(),
            &configs,
            &NamingScheme::default(),
            &ArchTable::default(),
            true,
        )
        .unwrap();

        assert!(!dir.path().join("CMakeLists.txt").exists());
        assert!(!dir.path().join("chip").exists());
    }
}
