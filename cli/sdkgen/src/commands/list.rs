//! `sdkgen list` — show loaded descriptors, derived chips, and targets.

use std::path::Path;

use anyhow::{Context, Result};

use sdkgen_model::{load_dir, ArchTable, ChipIdentity, NamingScheme};

/// Print every descriptor's derived identity and target list.
pub fn run(configs: &Path, naming: &NamingScheme, table: &ArchTable) -> Result<()> {
    let outcome = load_dir(configs, naming)
        .with_context(|| format!("reading descriptor directory {}", configs.display()))?;

    if outcome.is_empty() && outcome.failures.is_empty() {
        println!("No descriptors found in {}", configs.display());
        return Ok(());
    }

    for (source_id, descriptor) in &outcome.descriptors {
        let chip = ChipIdentity::new(source_id.clone(), table);
        println!("{source_id} ({})", chip.arch);
        if descriptor.targets.is_empty() {
            println!("  (no usable targets)");
        }
        for target in &descriptor.targets {
            println!("  {}", target.name);
        }
    }

    for failure in &outcome.failures {
        println!("failed: {} ({})", failure.path.display(), failure.reason);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn list_handles_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &NamingScheme::default(), &ArchTable::default()).unwrap();
    }

    #[test]
    fn list_reports_valid_and_invalid_descriptors() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("PLATFORM_SDK_TC321X_cmake.json"),
            r#"{"targets": [{"name": "gpio_demo"}]}"#,
        )
        .unwrap();
        fs::write(dir.path().join("PLATFORM_SDK_BAD_cmake.json"), "{{{").unwrap();

        run(dir.path(), &NamingScheme::default(), &ArchTable::default()).unwrap();
    }

    #[test]
    fn list_fails_on_missing_directory() {
        let result = run(
            Path::new("/nonexistent/configs"),
            &NamingScheme::default(),
            &ArchTable::default(),
        );
        assert!(result.is_err());
    }
}
