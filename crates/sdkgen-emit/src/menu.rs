//! Kconfig menu-tree builders and the Kconfig→CMake variable map.
//!
//! The menu tree has three tiers: chip selection, demo selection, and the
//! fixed toolchain/optimization tier. Chip and demo options are emitted in
//! sorted order so two runs over descriptors supplied in any order produce
//! byte-identical menus.

use std::collections::BTreeSet;

use sdkgen_model::{ident::option_symbol, ChipIdentity};

/// Root `Kconfig` sourcing the three menu tiers.
pub fn root_menu() -> String {
    String::from(
        r#"# Auto-generated SDK root Kconfig
mainmenu "Telink SDK Configuration"

# Include chip configurations
source "chip/Kconfig"

# Include demo configurations
source "demo/Kconfig"

# Include toolchain configurations
source "tools/Kconfig"
"#,
    )
}

/// `chip/Kconfig` — one bool option per chip.
///
/// `chips` must already be sorted by canonical name; the first entry
/// carries `default y`.
pub fn chip_menu(chips: &[ChipIdentity]) -> String {
    let mut out = String::from("# Auto-generated chip configurations\n\nmenu \"Chip Selection\"\n\n");

    for (i, chip) in chips.iter().enumerate() {
        out.push_str(&format!("config {}\n", chip.option_symbol()));
        out.push_str(&format!("    bool \"{}\"\n", chip.canonical_name));
        if i == 0 {
            out.push_str("    default y\n");
        }
        out.push_str("    help\n");
        out.push_str(&format!(
            "        Select {} as the target platform\n\n",
            chip.canonical_name
        ));
    }

    out.push_str("endmenu\n");
    out
}

/// `demo/Kconfig` — one bool option per distinct target name.
///
/// The `BTreeSet` both deduplicates across descriptors and fixes the
/// lexicographic emission order.
pub fn demo_menu(names: &BTreeSet<String>) -> String {
    let mut out =
        String::from("# Auto-generated demo program configurations\n\nmenu \"Demo Program Selection\"\n\n");

    for name in names {
        out.push_str(&format!("config {}\n", option_symbol("DEMO_", name)));
        out.push_str(&format!("    bool \"{name}\"\n"));
        out.push_str("    help\n");
        out.push_str(&format!("        Enable {name} sample program\n\n"));
    }

    out.push_str("endmenu\n");
    out
}

/// `tools/Kconfig` — fixed, descriptor-independent toolchain and
/// optimization-level menus.
pub fn toolchain_menu() -> String {
    String::from(
        r#"# Auto-generated toolchain configurations

menu "Toolchain Selection"

config TOOLCHAIN_RISCV
    bool "RISC-V Cross GCC"
    default y
    help
        Use RISC-V cross-compilation toolchain

config TOOLCHAIN_TC32
    bool "TC32-GCC Toolchain"
    help
        Use TC32 compilation toolchain

endmenu

menu "Compilation Optimization Level"

config OPT_LEVEL_0
    bool "-O0 (No optimization)"

config OPT_LEVEL_1
    bool "-O1 (Basic optimization)"

config OPT_LEVEL_2
    bool "-O2 (More optimization)"
    default y

config OPT_LEVEL_3
    bool "-O3 (Maximum optimization)"

endmenu
"#,
    )
}

/// `cmake/kconfig.cmake` — translates menu selections into CMake variables.
///
/// The chip chain is derived from the loaded chip set rather than a fixed
/// list, so every selectable chip resolves to a `CHIP_NAME`.
pub fn variable_map(chips: &[ChipIdentity]) -> String {
    let mut out = String::from("# Auto-generated Kconfig to CMake variable mapping\n\n");

    if !chips.is_empty() {
        out.push_str("# Chip selection\n");
        for (i, chip) in chips.iter().enumerate() {
            let keyword = if i == 0 { "if" } else { "elseif" };
            out.push_str(&format!("{keyword}({})\n", chip.option_symbol()));
            out.push_str(&format!("    set(CHIP_NAME \"{}\")\n", chip.canonical_name));
        }
        out.push_str("endif()\n\n");
    }

    out.push_str(
        r#"# Optimization level
if(OPT_LEVEL_0)
    add_compile_options(-O0)
elseif(OPT_LEVEL_1)
    add_compile_options(-O1)
elseif(OPT_LEVEL_2)
    add_compile_options(-O2)
elseif(OPT_LEVEL_3)
    add_compile_options(-O3)
endif()

# Toolchain selection
if(TOOLCHAIN_RISCV)
    set(TOOLCHAIN_NAME "RISC-V Cross GCC")
elseif(TOOLCHAIN_TC32)
    set(TOOLCHAIN_NAME "TC32-GCC Toolchain")
endif()
"#,
    );

    out
}
