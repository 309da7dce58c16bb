// tests/common/mod.rs

#![allow(dead_code)]

//! Shared fixture trees for integration tests
//!
//! Miniature source trees carrying exactly the lines the patch catalogs
//! target, laid out the way the real release archives are.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).expect("fixture mkdir");
    fs::write(path, content).expect("fixture write");
}

/// A MAVSDK 1.4.x-shaped tree
pub fn v1_tree() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    let root = dir.path();

    write(
        root,
        "CMakeLists.txt",
        "cmake_minimum_required(VERSION 3.13)\n\
         project(mavsdk)\n\
         message(STATUS \"Version: ${VERSION_STR}\")\n\
         add_subdirectory(src)\n",
    );
    write(
        root,
        "src/CMakeLists.txt",
        "add_subdirectory(core)\n\
         add_subdirectory(${CMAKE_CURRENT_SOURCE_DIR}/third_party/gtest EXCLUDE_FROM_ALL)\n\
         add_subdirectory(plugins)\n",
    );
    write(
        root,
        "src/cmake/unit_tests.cmake",
        "target_link_libraries(unit_tests_runner\n\
         \x20   gtest\n\
         \x20   gtest_main\n\
         \x20   gmock\n\
         \x20   JsonCpp::jsoncpp\n\
         )\n",
    );
    write(
        root,
        "src/integration_tests/CMakeLists.txt",
        "target_link_libraries(integration_tests_runner\n\
         \x20   gtest\n\
         \x20   gtest_main\n\
         \x20   gmock\n\
         )\n",
    );
    write(
        root,
        "src/core/connection.h",
        "#pragma once\n\
         #include <unordered_set>\n\
         class Connection;\n",
    );
    write(
        root,
        "src/plugins/mission/CMakeLists.txt",
        "target_link_libraries(mavsdk_mission PRIVATE JsonCpp::jsoncpp)\n",
    );
    write(
        root,
        "src/plugins/mission_raw/CMakeLists.txt",
        "target_link_libraries(mavsdk_mission_raw PRIVATE JsonCpp::jsoncpp)\n",
    );
    write(root, "LICENSE", "BSD-3-Clause\n");
    dir
}

/// A MAVSDK 2.x-shaped tree
pub fn v2_tree() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    let root = dir.path();

    write(
        root,
        "CMakeLists.txt",
        "cmake_minimum_required(VERSION 3.13)\n\
         project(mavsdk)\n\
         message(STATUS \"Version: ${VERSION_STR}\")\n\
         if(NOT MAVSDK_SUPERBUILD)\n\
         \x20   if(BUILD_TESTING)\n\
         \x20       add_subdirectory(third_party/gtest)\n\
         \x20   endif()\n\
         \x20   add_subdirectory(third_party/mavlink)\n\
         endif()\n\
         add_subdirectory(src)\n",
    );
    write(
        root,
        "src/mavsdk/CMakeLists.txt",
        "add_subdirectory(core)\n\
         add_subdirectory(third_party/jsoncpp)\n\
         add_subdirectory(plugins)\n",
    );
    write(
        root,
        "src/mavsdk/cmake/unit_tests.cmake",
        "target_link_libraries(unit_tests_runner\n\
         \x20   gtest\n\
         \x20   gtest_main\n\
         \x20   gmock\n\
         )\n",
    );
    write(
        root,
        "src/mavsdk/plugins/mission/CMakeLists.txt",
        "target_link_libraries(mavsdk PRIVATE JsonCpp::jsoncpp)\n",
    );
    write(
        root,
        "src/mavsdk/plugins/mission_raw/CMakeLists.txt",
        "target_link_libraries(mavsdk PRIVATE JsonCpp::jsoncpp)\n",
    );
    write(root, "LICENSE", "BSD-3-Clause\n");
    dir
}

/// Snapshot every file in the tree, path → content
pub fn snapshot(root: &Path) -> BTreeMap<String, String> {
    let mut files = BTreeMap::new();
    collect(root, root, &mut files);
    files
}

fn collect(root: &Path, dir: &Path, files: &mut BTreeMap<String, String>) {
    for entry in fs::read_dir(dir).expect("read_dir") {
        let entry = entry.expect("dir entry");
        let path = entry.path();
        if path.is_dir() {
            collect(root, &path, files);
        } else {
            let rel = path
                .strip_prefix(root)
                .expect("under root")
                .to_string_lossy()
                .into_owned();
            files.insert(rel, fs::read_to_string(&path).expect("read file"));
        }
    }
}
