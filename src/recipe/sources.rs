// src/recipe/sources.rs

//! Pinned source locations
//!
//! Each recipe version pins an exact release archive (by sha256) and an
//! exact MAVLink header commit (never a branch or tag, so a rebuild years
//! later fetches identical bytes). The relative offsets below are where
//! the patched build scripts expect to find things; the configuration
//! generator derives its include paths from them rather than hand-entering
//! absolute paths.

use super::RecipeVersion;

/// Where a recipe version's sources come from and where they land
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSpec {
    /// Release archive, extracted stripped of its top-level directory
    pub archive_url: &'static str,
    /// `sha256:`-prefixed checksum of the archive
    pub archive_checksum: &'static str,
    /// MAVLink header repository
    pub mavlink_repo: &'static str,
    /// Exact commit to fetch, full hash
    pub mavlink_commit: &'static str,
    /// Where the MAVLink headers are placed beneath the source root
    pub mavlink_dir: &'static str,
    /// Include root the build scripts add to the compiler search path,
    /// relative to the source root
    pub mavlink_include_offset: &'static str,
}

/// Source pins for one recipe version
pub fn source_for(version: RecipeVersion) -> SourceSpec {
    match version {
        RecipeVersion::V1 => SourceSpec {
            archive_url: "https://github.com/mavlink/MAVSDK/archive/refs/tags/v1.4.16.tar.gz",
            archive_checksum:
                "sha256:0926dd04d70b5ac203184eb16c7c5d78e6bc29d1680035f21bcec9e02c9a0bcf",
            mavlink_repo: "https://github.com/mavlink/c_library_v2.git",
            mavlink_commit: "b661cde6adb4b5b0ba0d346ba9ca1d400391b2f7",
            mavlink_dir: "src/third_party/mavlink/include/mavlink/v2.0",
            mavlink_include_offset: "src/third_party/mavlink/include",
        },
        RecipeVersion::V2 => SourceSpec {
            archive_url: "https://github.com/mavlink/MAVSDK/archive/refs/tags/v2.12.2.tar.gz",
            archive_checksum:
                "sha256:a1f2f76c9b7d43964c3e18899ee0b8d0c375b2a8a31b91e3e04b7b98786e8f42",
            mavlink_repo: "https://github.com/mavlink/c_library_v2.git",
            mavlink_commit: "f8d85c417f2f87a769a1fa1b8e3035bd2b4ea266",
            mavlink_dir: "third_party/mavlink/include/mavlink/v2.0",
            mavlink_include_offset: "third_party/mavlink/include",
        },
    }
}
