// src/recipe/mod.rs

//! Versioned recipe data for the wrapped library
//!
//! A recipe is everything that varies with the MAVSDK release being
//! packaged: which archive and MAVLink commit to fetch, which rewrites to
//! apply to the upstream build scripts, which external dependencies the
//! rewrites link against, and which plugin libraries the finished package
//! exposes.
//!
//! The two supported releases diverged structurally upstream, so the two
//! catalogs are fully independent lists selected by [`RecipeVersion`] —
//! there is deliberately no shared base with overrides.

mod catalog;
mod deps;
mod manifest;
mod sources;

pub use catalog::operations_for;
pub use deps::{dependency_ranges, DependencyRange};
pub use manifest::{ManifestExport, PluginManifest};
pub use sources::{source_for, SourceSpec};

use strum_macros::{Display, EnumString};

/// Immutable identifier selecting one recipe: operation list, dependency
/// ranges, source pins and plugin set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum RecipeVersion {
    /// MAVSDK 1.4.x (per-plugin libraries, vendored gtest subdirectory)
    #[strum(serialize = "1.4", serialize = "v1")]
    V1,
    /// MAVSDK 2.x (superbuild third_party tree, extra plugins)
    #[strum(serialize = "2", serialize = "v2")]
    V2,
}

impl RecipeVersion {
    /// Exact library version this recipe builds
    pub fn library_version(&self) -> &'static str {
        match self {
            Self::V1 => "1.4.16",
            Self::V2 => "2.12.2",
        }
    }
}
