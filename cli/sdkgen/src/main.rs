//! Sdkgen CLI — generate SDK build trees from chip descriptors.

mod commands;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use manifest::SdkgenManifest;

#[derive(Parser)]
#[command(name = "sdkgen", version, about = "SDK build-tree generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the build tree from chip descriptors
    Generate {
        /// Root of the generated tree (default: manifest directory or cwd)
        #[arg(long)]
        root: Option<PathBuf>,
        /// Descriptor directory (default: <root>/cmake_configs)
        #[arg(long)]
        configs: Option<PathBuf>,
        /// Report what would be generated without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// List descriptors, derived chip identities, and targets
    List {
        /// Descriptor directory (default: <root>/cmake_configs)
        #[arg(long)]
        configs: Option<PathBuf>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let (manifest, manifest_dir) = match SdkgenManifest::find_and_load(&cwd)? {
        Some((manifest, dir)) => (manifest, Some(dir)),
        None => (SdkgenManifest::default(), None),
    };
    let naming = manifest.naming();
    let table = manifest.arch_table();

    match cli.command {
        Commands::Generate {
            root,
            configs,
            dry_run,
        } => {
            let root = root
                .or_else(|| manifest_dir.clone())
                .unwrap_or_else(|| cwd.clone());
            let configs = resolve_configs(configs, &manifest, &root);
            commands::generate::run(&root, &configs, &naming, &table, dry_run)
        }
        Commands::List { configs } => {
            let root = manifest_dir.unwrap_or(cwd);
            let configs = resolve_configs(configs, &manifest, &root);
            commands::list::run(&configs, &naming, &table)
        }
    }
}

/// Flag beats manifest beats the `cmake_configs` default.
fn resolve_configs(flag: Option<PathBuf>, manifest: &SdkgenManifest, root: &Path) -> PathBuf {
    if let Some(configs) = flag {
        return configs;
    }
    root.join(manifest.configs_dir().unwrap_or("cmake_configs"))
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::fs;

    use sdkgen_model::{ArchTable, NamingScheme};

    fn write_descriptor(configs: &Path, file_name: &str, json: &str) {
        fs::create_dir_all(configs).unwrap();
        fs::write(configs.join(file_name), json).unwrap();
    }

    fn seed_two_chips(configs: &Path) {
        write_descriptor(
            configs,
            "PLATFORM_SDK_B92_cmake.json",
            r#"{"targets": [{"name": "uart_demo", "directories": ["src"]}]}"#,
        );
        write_descriptor(
            configs,
            "PLATFORM_SDK_TC321X_cmake.json",
            r#"{"targets": [{"name": "gpio_demo", "directories": ["src"]}]}"#,
        );
    }

    fn generate(root: &Path, configs: &Path) {
        commands::generate::run(
            root,
            configs,
            &NamingScheme::default(),
            &ArchTable::default(),
            false,
        )
        .unwrap();
    }

    /// Recursive snapshot of all regular files under `dir`.
    fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
        fn walk(dir: &Path, base: &Path, out: &mut BTreeMap<PathBuf, Vec<u8>>) {
            for entry in fs::read_dir(dir).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    walk(&path, base, out);
                } else {
                    let rel = path.strip_prefix(base).unwrap().to_path_buf();
                    out.insert(rel, fs::read(&path).unwrap());
                }
            }
        }
        let mut out = BTreeMap::new();
        walk(dir, dir, &mut out);
        out
    }

    #[test]
    fn two_descriptor_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("tree");
        fs::create_dir_all(&root).unwrap();
        let configs = dir.path().join("cmake_configs");
        seed_two_chips(&configs);

        generate(&root, &configs);

        // Two project subtrees, two toolchain files.
        assert!(root.join("chip/B92/CMakeLists.txt").is_file());
        assert!(root.join("chip/TC321X/CMakeLists.txt").is_file());
        assert!(root.join("cmake/toolchain_b92.cmake").is_file());
        assert!(root.join("cmake/toolchain_tc321x.cmake").is_file());

        // Chip menu: B92 default selected, TC321X present.
        let chip_menu = fs::read_to_string(root.join("chip/Kconfig")).unwrap();
        assert!(chip_menu.contains("config CHIP_B92\n    bool \"B92\"\n    default y"));
        assert!(chip_menu.contains("config CHIP_TC321X"));

        // Demo menu: sorted symbols, both demos.
        let demo_menu = fs::read_to_string(root.join("demo/Kconfig")).unwrap();
        let gpio = demo_menu.find("config DEMO_GPIO_DEMO").unwrap();
        let uart = demo_menu.find("config DEMO_UART_DEMO").unwrap();
        assert!(gpio < uart);

        // No cross-contamination of target lists.
        let uart_demo =
            fs::read_to_string(root.join("demo/vendor/uart_demo/CMakeLists.txt")).unwrap();
        assert!(uart_demo.contains("chip/B92/drivers/include"));
        assert!(!uart_demo.contains("TC321X"));
    }

    #[test]
    fn second_run_writes_nothing_new() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("tree");
        fs::create_dir_all(&root).unwrap();
        let configs = dir.path().join("cmake_configs");
        seed_two_chips(&configs);

        generate(&root, &configs);
        let first = snapshot(&root);

        generate(&root, &configs);
        assert_eq!(snapshot(&root), first, "re-run must be byte-identical");
    }

    #[test]
    fn menus_identical_for_permuted_descriptor_sets() {
        let dir = tempfile::tempdir().unwrap();

        // Same descriptors written in opposite order into two trees.
        let configs_a = dir.path().join("a_configs");
        write_descriptor(&configs_a, "PLATFORM_SDK_B92_cmake.json", r#"{"targets": [{"name": "uart_demo"}]}"#);
        write_descriptor(&configs_a, "PLATFORM_SDK_TC321X_cmake.json", r#"{"targets": [{"name": "gpio_demo"}]}"#);

        let configs_b = dir.path().join("b_configs");
        write_descriptor(&configs_b, "PLATFORM_SDK_TC321X_cmake.json", r#"{"targets": [{"name": "gpio_demo"}]}"#);
        write_descriptor(&configs_b, "PLATFORM_SDK_B92_cmake.json", r#"{"targets": [{"name": "uart_demo"}]}"#);

        let root_a = dir.path().join("tree_a");
        let root_b = dir.path().join("tree_b");
        fs::create_dir_all(&root_a).unwrap();
        fs::create_dir_all(&root_b).unwrap();
        generate(&root_a, &configs_a);
        generate(&root_b, &configs_b);

        for menu in ["chip/Kconfig", "demo/Kconfig"] {
            assert_eq!(
                fs::read_to_string(root_a.join(menu)).unwrap(),
                fs::read_to_string(root_b.join(menu)).unwrap(),
                "{menu} must not depend on descriptor order"
            );
        }
    }

    #[test]
    fn hand_edited_files_survive_regeneration() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("tree");
        let configs = dir.path().join("cmake_configs");
        seed_two_chips(&configs);

        fs::create_dir_all(root.join("chip/B92")).unwrap();
        fs::write(root.join("chip/B92/CMakeLists.txt"), "# my local setup\n").unwrap();

        generate(&root, &configs);

        let content = fs::read_to_string(root.join("chip/B92/CMakeLists.txt")).unwrap();
        assert_eq!(content, "# my local setup\n");
        // The rest of the chip's artifacts are still materialized.
        assert!(root.join("cmake/toolchain_b92.cmake").is_file());
    }

    #[test]
    fn malformed_descriptor_does_not_spoil_the_valid_one() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("tree");
        fs::create_dir_all(&root).unwrap();
        let configs = dir.path().join("cmake_configs");
        write_descriptor(&configs, "PLATFORM_SDK_BAD_cmake.json", "not json {{{");
        write_descriptor(
            &configs,
            "PLATFORM_SDK_TC321X_cmake.json",
            r#"{"targets": [{"name": "gpio_demo", "directories": ["src"]}]}"#,
        );

        generate(&root, &configs);

        // Consistent tree for the valid chip only.
        assert!(root.join("chip/TC321X/CMakeLists.txt").is_file());
        assert!(!root.join("chip/BAD").exists());
        let chip_menu = fs::read_to_string(root.join("chip/Kconfig")).unwrap();
        assert!(chip_menu.contains("CHIP_TC321X"));
        assert!(!chip_menu.contains("CHIP_BAD"));
    }

    #[cfg(unix)]
    #[test]
    fn chip_shortcut_is_a_symlink() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("tree");
        fs::create_dir_all(&root).unwrap();
        let configs = dir.path().join("cmake_configs");
        seed_two_chips(&configs);

        generate(&root, &configs);

        let link = root.join("CMakeLists_B92.txt");
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        let target = fs::read_to_string(&link).unwrap();
        assert!(target.contains("set(CHIP_NAME B92)"));
    }

    #[test]
    fn resolve_configs_precedence() {
        let manifest = SdkgenManifest::default();
        let root = Path::new("/tree");

        let flagged = resolve_configs(Some(PathBuf::from("/elsewhere")), &manifest, root);
        assert_eq!(flagged, Path::new("/elsewhere"));

        let defaulted = resolve_configs(None, &manifest, root);
        assert_eq!(defaulted, Path::new("/tree/cmake_configs"));
    }
}
