// tests/patch_catalog.rs

//! Catalog-level integration tests: applying a full recipe catalog to a
//! fixture tree, replaying it, and previewing it.

mod common;

use mavforge::{operations_for, PatchOp, Patcher, RecipeVersion};
use std::fs;

#[test]
fn v1_catalog_rewrites_the_tree() {
    let tree = common::v1_tree();
    let patcher = Patcher::new(tree.path());
    patcher
        .apply_all(&operations_for(RecipeVersion::V1))
        .expect("full v1 catalog applies");

    let top = fs::read_to_string(tree.path().join("CMakeLists.txt")).unwrap();
    assert!(top.contains("set(VERSION_STR v1.4.16)"));

    let src = fs::read_to_string(tree.path().join("src/CMakeLists.txt")).unwrap();
    assert!(!src.contains("third_party/gtest"), "vendored gtest removed");

    let unit = fs::read_to_string(tree.path().join("src/cmake/unit_tests.cmake")).unwrap();
    assert!(unit.contains("find_package(GTest REQUIRED)"));
    assert!(unit.contains("    GTest::Main\n    tinyxml2::tinyxml2"));
    assert!(unit.contains("    GTest::gtest"));
    assert!(unit.contains("    GTest::gmock"));
    assert!(unit.contains("JsonCpp::JsonCpp"));
    assert!(!unit.contains("JsonCpp::jsoncpp"));

    let integration =
        fs::read_to_string(tree.path().join("src/integration_tests/CMakeLists.txt")).unwrap();
    assert!(integration.contains("find_package(GTest REQUIRED)"));
    assert!(integration.contains("    GTest::Main"));

    let header = fs::read_to_string(tree.path().join("src/core/connection.h")).unwrap();
    assert!(header.contains("#include <unordered_set>\n#include <atomic>"));
}

#[test]
fn v1_catalog_applied_twice_equals_applied_once() {
    // Recipes may be re-invoked against a half-built cache; replaying the
    // whole catalog must neither error nor change anything.
    let tree = common::v1_tree();
    let patcher = Patcher::new(tree.path());
    let catalog = operations_for(RecipeVersion::V1);

    patcher.apply_all(&catalog).expect("first application");
    let once = common::snapshot(tree.path());

    patcher.apply_all(&catalog).expect("replay must not error");
    let twice = common::snapshot(tree.path());

    assert_eq!(once, twice);
}

#[test]
fn v2_catalog_rewrites_the_tree_and_replays_cleanly() {
    let tree = common::v2_tree();
    let patcher = Patcher::new(tree.path());
    let catalog = operations_for(RecipeVersion::V2);

    patcher.apply_all(&catalog).expect("full v2 catalog applies");

    let top = fs::read_to_string(tree.path().join("CMakeLists.txt")).unwrap();
    assert!(top.contains("set(VERSION_STR v2.12.2)"));
    assert!(
        !top.contains("MAVSDK_SUPERBUILD"),
        "superbuild block deleted"
    );
    assert!(top.contains("add_subdirectory(src)"), "deletion is balanced");

    let src = fs::read_to_string(tree.path().join("src/mavsdk/CMakeLists.txt")).unwrap();
    assert!(src.contains("#add_subdirectory(third_party/jsoncpp)"));
    assert_eq!(src.lines().count(), 3, "commenting preserves line count");

    let unit = fs::read_to_string(tree.path().join("src/mavsdk/cmake/unit_tests.cmake")).unwrap();
    assert!(unit.starts_with("find_package(GTest REQUIRED)\n"));
    assert!(unit.contains("    GTest::Main"));

    let once = common::snapshot(tree.path());
    patcher.apply_all(&catalog).expect("replay must not error");
    assert_eq!(once, common::snapshot(tree.path()));
}

#[test]
fn dry_run_previews_every_changed_file_without_writing() {
    let tree = common::v1_tree();
    let patcher = Patcher::new(tree.path());
    let before = common::snapshot(tree.path());

    let previews = patcher
        .preview(&operations_for(RecipeVersion::V1))
        .expect("preview");

    assert_eq!(before, common::snapshot(tree.path()), "tree untouched");

    let files: Vec<String> = previews
        .iter()
        .map(|p| {
            p.file
                .strip_prefix(tree.path())
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    assert!(files.contains(&"CMakeLists.txt".to_string()));
    assert!(files.contains(&"src/core/connection.h".to_string()));

    let unit_diff = &previews
        .iter()
        .find(|p| p.file.ends_with("src/cmake/unit_tests.cmake"))
        .expect("unit_tests diff")
        .diff;
    assert!(unit_diff.contains("+find_package(GTest REQUIRED)"));
    assert!(unit_diff.contains("-    gtest_main"));
}

#[test]
fn missing_required_file_fails_the_recipe() {
    let tree = common::v1_tree();
    // Simulate an upstream release that dropped the integration tests.
    fs::remove_file(tree.path().join("src/integration_tests/CMakeLists.txt")).unwrap();

    let patcher = Patcher::new(tree.path());
    let err = patcher
        .apply_all(&operations_for(RecipeVersion::V1))
        .expect_err("required file missing must fail the recipe");
    assert!(matches!(err, mavforge::PatchError::FileNotFound(_)));
}

#[test]
fn missing_optional_target_degrades_to_a_noop() {
    let tree = common::v2_tree();
    // Only optional entries target this file; a release without it must
    // still patch cleanly.
    fs::remove_file(tree.path().join("src/mavsdk/CMakeLists.txt")).unwrap();

    let patcher = Patcher::new(tree.path());
    patcher
        .apply_all(&operations_for(RecipeVersion::V2))
        .expect("optional targets may be absent");
}

#[test]
fn catalog_is_declarative_data() {
    // The catalog exposes what it changes; a consumer can audit the file
    // set without running anything.
    let catalog = operations_for(RecipeVersion::V1);
    assert!(catalog.len() >= 10);
    assert!(catalog.iter().any(|p| matches!(
        p.op,
        PatchOp::LiteralReplace { ref needle, .. } if needle == "JsonCpp::jsoncpp"
    )));
}
