//! Toolchain-file builders: the shared dispatcher and one file per chip.

use sdkgen_model::{ArchClass, ChipIdentity};

/// Shared `cmake/toolchain.cmake`.
///
/// Common compiler settings followed by a dispatcher that includes the
/// selected chip's toolchain file. Selecting no chip fails the build
/// configuration with a descriptive condition — that failure lives in the
/// generated artifact, not in the generator.
pub fn shared_toolchain(chips: &[ChipIdentity]) -> String {
    let mut out = String::from(
        r#"# Shared toolchain configuration for all chips
# Common settings, then dispatch into the selected chip's toolchain file

set(CMAKE_C_STANDARD 11)
set(CMAKE_C_STANDARD_REQUIRED ON)

add_compile_options(
    -Wall
    -Wextra
    -Werror
    -Wno-unused-parameter
    -Wno-unused-function
)

if(CMAKE_BUILD_TYPE STREQUAL "Debug")
    add_compile_options(-O0 -g3)
else()
    add_compile_options(-O2 -g)
endif()

# Chip-specific toolchain dispatch
"#,
    );

    for (i, chip) in chips.iter().enumerate() {
        let keyword = if i == 0 { "if" } else { "elseif" };
        out.push_str(&format!("{keyword}({})\n", chip.option_symbol()));
        out.push_str(&format!(
            "    include(${{CMAKE_SOURCE_DIR}}/cmake/toolchain_{}.cmake)\n",
            chip.file_stem()
        ));
    }
    if chips.is_empty() {
        out.push_str(
            "message(FATAL_ERROR \"No chip selected! Please enable one of the CHIP_* options.\")\n",
        );
    } else {
        out.push_str("else()\n");
        out.push_str(
            "    message(FATAL_ERROR \"No chip selected! Please enable one of the CHIP_* options.\")\n",
        );
        out.push_str("endif()\n");
    }

    out
}

/// Per-chip `cmake/toolchain_<chip>.cmake`.
///
/// Tool names and flag sets are fixed per architecture class. Unclassified
/// chips get only the identity comment — a narrower file, not an error.
pub fn chip_toolchain(chip: &ChipIdentity) -> String {
    let mut out = format!("# Toolchain configuration for {}\n\n", chip.canonical_name);

    match chip.arch {
        ArchClass::Tc32 => out.push_str(
            r#"# TC32 architecture specific settings
set(ARCH tc32)
set(CMAKE_C_COMPILER tc32-elf-gcc)
set(CMAKE_ASM_COMPILER tc32-elf-gcc)
set(CMAKE_LINKER tc32-elf-ld)
set(CMAKE_OBJCOPY tc32-elf-objcopy)

add_compile_options(
    -mtc32
    -mlittle-endian
)

add_link_options(
    -mtc32
    -nostartfiles
)
"#,
        ),
        ArchClass::RiscV => out.push_str(
            r#"# RISC-V architecture specific settings
set(ARCH riscv)
set(CMAKE_C_COMPILER riscv32-elf-gcc)
set(CMAKE_ASM_COMPILER riscv32-elf-gcc)
set(CMAKE_LINKER riscv32-elf-ld)
set(CMAKE_OBJCOPY riscv32-elf-objcopy)

add_compile_options(
    -march=rv32imc
    -mabi=ilp32
    -mcmodel=medany
)

add_link_options(
    -march=rv32imc
    -mabi=ilp32
)
"#,
        ),
        ArchClass::Unclassified => {}
    }

    out
}
