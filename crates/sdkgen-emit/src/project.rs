//! CMake project-file builders: the root project file, one file per chip,
//! and one file per demo target.

use sdkgen_model::{ChipIdentity, TargetSpec};

/// Root `CMakeLists.txt`.
///
/// Declares one `option(CHIP_*)` per chip so every loaded chip is selectable
/// from the root, then recursively adds every subdirectory carrying its own
/// `CMakeLists.txt`.
pub fn root_project(chips: &[ChipIdentity]) -> String {
    let mut out = String::from(
        r#"cmake_minimum_required(VERSION 3.19)
project(tl_new_sdk)

# Include all submodules
include(cmake/toolchain.cmake)
include(cmake/kconfig.cmake)

# Chip support options
"#,
    );

    for chip in chips {
        out.push_str(&format!(
            "option({} \"Enable {} chip support\" OFF)\n",
            chip.option_symbol(),
            chip.canonical_name
        ));
    }

    out.push_str(
        r#"
# Recursively add all subdirectories
file(GLOB_RECURSE SUB_DIRS RELATIVE ${CMAKE_CURRENT_SOURCE_DIR} *)
foreach(DIR ${SUB_DIRS})
    if(IS_DIRECTORY ${CMAKE_CURRENT_SOURCE_DIR}/${DIR} AND EXISTS ${CMAKE_CURRENT_SOURCE_DIR}/${DIR}/CMakeLists.txt)
        add_subdirectory(${DIR})
    endif()
endforeach()

# Include Kconfig configuration
include(${CMAKE_BINARY_DIR}/kconfig.cmake)
"#,
    );

    out
}

/// Per-chip `chip/<chip>/CMakeLists.txt`.
///
/// References the three fixed chip subdirectories and sets the chip's
/// compile definition.
pub fn chip_project(chip: &ChipIdentity) -> String {
    format!(
        r#"# Auto-generated {name} chip CMake configuration
set(CHIP_NAME {name})

add_subdirectory(boot)
add_subdirectory(drivers)
add_subdirectory(link)

add_definitions(-D{symbol})
"#,
        name = chip.canonical_name,
        symbol = chip.option_symbol(),
    )
}

/// Per-target `demo/vendor/<name>/CMakeLists.txt`.
///
/// Source directories are emitted in verbatim order; linker-option,
/// linked-library, and hook blocks are omitted entirely when absent. Only
/// the first command of each pre-/post-build hook list is honored; further
/// commands are not chained.
pub fn target_project(chip: &ChipIdentity, spec: &TargetSpec) -> String {
    let mut out = format!(
        "# Auto-generated {name} demo CMake configuration\nproject({name})\n\n",
        name = spec.name,
    );

    if !spec.directories.is_empty() {
        out.push_str("set(SOURCES\n");
        for dir in &spec.directories {
            out.push_str(&format!("    {dir}\n"));
        }
        out.push_str(")\n\n");
    }

    out.push_str("add_executable(${PROJECT_NAME} ${SOURCES})\n\n");

    out.push_str("target_include_directories(${PROJECT_NAME} PRIVATE\n");
    out.push_str(&format!(
        "    ${{CMAKE_SOURCE_DIR}}/chip/{}/drivers/include\n",
        chip.canonical_name
    ));
    out.push_str(")\n\n");

    if let Some(options) = &spec.linker_options {
        out.push_str("target_link_options(${PROJECT_NAME} PRIVATE\n");
        for opt in options {
            out.push_str(&format!("    {opt}\n"));
        }
        out.push_str(")\n\n");
    }

    if let Some(libraries) = &spec.linker_libraries {
        out.push_str("target_link_libraries(${PROJECT_NAME} PRIVATE\n");
        for lib in libraries {
            out.push_str(&format!("    {lib}\n"));
        }
        out.push_str(")\n\n");
    }

    if let Some(command) = spec.pre_build.as_ref().and_then(|c| c.first()) {
        out.push_str("add_custom_command(TARGET ${PROJECT_NAME} PRE_BUILD\n");
        out.push_str(&format!("    COMMAND {command}\n"));
        out.push_str("    COMMENT \"Executing pre-build steps\"\n)\n\n");
    }

    if let Some(command) = spec.post_build.as_ref().and_then(|c| c.first()) {
        out.push_str("add_custom_command(TARGET ${PROJECT_NAME} POST_BUILD\n");
        out.push_str(&format!("    COMMAND {command}\n"));
        out.push_str("    COMMENT \"Executing post-build steps\"\n)\n");
    }

    out
}
