// src/recipe/catalog.rs

//! Per-version patch catalogs
//!
//! Each catalog is the ordered list of rewrites that make one MAVSDK
//! release build against externally supplied dependencies instead of its
//! vendored copies. Order is a correctness property: several entries
//! target text that an earlier entry introduces (the `find_package`
//! injections) or would otherwise shadow (`gtest_main` must be renamed
//! before `gtest`, which is its prefix). Entries whose needle is consumed
//! by a later entry are marked optional so replaying the catalog against
//! an already-patched tree stays a no-op.

use super::RecipeVersion;
use crate::patch::{BalanceRule, PatchOp, ScriptedPatch};

/// The ordered operation list for one recipe version. Deterministic:
/// returns the same sequence on every call.
pub fn operations_for(version: RecipeVersion) -> Vec<ScriptedPatch> {
    match version {
        RecipeVersion::V1 => v1_catalog(),
        RecipeVersion::V2 => v2_catalog(),
    }
}

/// MAVSDK 1.4.x
fn v1_catalog() -> Vec<ScriptedPatch> {
    let mut ops = Vec::new();

    // tinyxml2.h is used by camera_definition_test, so unit_tests must
    // link tinyxml2. The needle disappears once the gtest targets are
    // renamed below, hence optional.
    ops.push(ScriptedPatch::optional(
        "src/cmake/unit_tests.cmake",
        PatchOp::replace("gtest_main", "gtest_main\n    tinyxml2::tinyxml2"),
    ));

    // The release tarball has no git metadata, so the version probe in the
    // top-level list prints an empty string. Pin it.
    ops.push(ScriptedPatch::required(
        "CMakeLists.txt",
        PatchOp::replace(
            "message(STATUS \"Version: ${VERSION_STR}\")",
            "set(VERSION_STR v1.4.16)\nmessage(STATUS \"Version: ${VERSION_STR}\")",
        ),
    ));

    // Drop the vendored gtest; the externally resolved one is linked in
    // via the find_package injections below.
    ops.push(ScriptedPatch::required(
        "src/CMakeLists.txt",
        PatchOp::delete_line(
            "add_subdirectory(${CMAKE_CURRENT_SOURCE_DIR}/third_party/gtest EXCLUDE_FROM_ALL)",
        ),
    ));

    // Relink both test runners against the external GTest targets.
    // gtest_main must be renamed before gtest (prefix) and gmock last,
    // matching the link order in the upstream lists.
    for (file, runner) in [
        (
            "src/integration_tests/CMakeLists.txt",
            "integration_tests_runner",
        ),
        ("src/cmake/unit_tests.cmake", "unit_tests_runner"),
    ] {
        ops.push(ScriptedPatch::required(
            file,
            PatchOp::replace(
                format!("target_link_libraries({runner}"),
                format!("find_package(GTest REQUIRED)\ntarget_link_libraries({runner}"),
            ),
        ));
        ops.push(ScriptedPatch::required(
            file,
            PatchOp::replace("    gtest_main", "    GTest::Main"),
        ));
        ops.push(ScriptedPatch::required(
            file,
            PatchOp::replace("    gtest", "    GTest::gtest"),
        ));
        ops.push(ScriptedPatch::required(
            file,
            PatchOp::replace("    gmock", "    GTest::gmock"),
        ));
    }

    // connection.h uses std::atomic without including it; newer libstdc++
    // no longer pulls it in transitively.
    ops.push(ScriptedPatch::required(
        "src/core/connection.h",
        PatchOp::replace(
            "#include <unordered_set>",
            "#include <unordered_set>\n#include <atomic>",
        ),
    ));

    // The jsoncpp package exports JsonCpp::JsonCpp, not the lowercase
    // target the upstream lists expect.
    for file in [
        "src/cmake/unit_tests.cmake",
        "src/plugins/mission_raw/CMakeLists.txt",
        "src/plugins/mission/CMakeLists.txt",
    ] {
        ops.push(ScriptedPatch::required(
            file,
            PatchOp::replace("JsonCpp::jsoncpp", "JsonCpp::JsonCpp"),
        ));
    }

    ops
}

/// MAVSDK 2.x
///
/// The 2.x tree moved the plugins under src/mavsdk and gates its vendored
/// dependencies behind a superbuild block in the top-level list. Point
/// releases shuffle that block, so the structural deletions are optional.
fn v2_catalog() -> Vec<ScriptedPatch> {
    let mut ops = Vec::new();

    ops.push(ScriptedPatch::required(
        "CMakeLists.txt",
        PatchOp::replace(
            "message(STATUS \"Version: ${VERSION_STR}\")",
            "set(VERSION_STR v2.12.2)\nmessage(STATUS \"Version: ${VERSION_STR}\")",
        ),
    ));

    // Remove the whole superbuild block that builds the vendored
    // third_party tree; external dependencies replace it. The block nests
    // further conditionals, so track if(/endif( pairs.
    ops.push(ScriptedPatch::optional(
        "CMakeLists.txt",
        PatchOp::BlockDelete {
            start_marker: "if(NOT MAVSDK_SUPERBUILD)".into(),
            balance: BalanceRule::nested("if(", "endif("),
        },
    ));

    // Any straggler vendored subdirectory references outside the block are
    // commented rather than deleted, keeping line numbers stable for the
    // remaining entries.
    ops.push(ScriptedPatch::optional(
        "src/mavsdk/CMakeLists.txt",
        PatchOp::CommentMatching {
            needle: "add_subdirectory(third_party".into(),
            marker: "#".into(),
        },
    ));

    // The 2.x unit test list assumes gtest targets already exist (the
    // superbuild provided them). Resolve them up front instead.
    ops.push(ScriptedPatch::required(
        "src/mavsdk/cmake/unit_tests.cmake",
        PatchOp::Prepend {
            text: "find_package(GTest REQUIRED)\n".into(),
        },
    ));
    ops.push(ScriptedPatch::required(
        "src/mavsdk/cmake/unit_tests.cmake",
        PatchOp::replace("    gtest_main", "    GTest::Main"),
    ));
    ops.push(ScriptedPatch::required(
        "src/mavsdk/cmake/unit_tests.cmake",
        PatchOp::replace("    gtest", "    GTest::gtest"),
    ));
    ops.push(ScriptedPatch::required(
        "src/mavsdk/cmake/unit_tests.cmake",
        PatchOp::replace("    gmock", "    GTest::gmock"),
    ));

    for file in [
        "src/mavsdk/plugins/mission_raw/CMakeLists.txt",
        "src/mavsdk/plugins/mission/CMakeLists.txt",
    ] {
        ops.push(ScriptedPatch::required(
            file,
            PatchOp::replace("JsonCpp::jsoncpp", "JsonCpp::JsonCpp"),
        ));
    }

    ops
}
