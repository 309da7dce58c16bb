// src/recipe/deps.rs

//! External dependency version-range sets
//!
//! These ranges are handed to the package index that resolves the
//! externally supplied dependencies the patched build links against.
//! Resolution itself happens elsewhere; this module only declares what
//! each recipe version is compatible with.

use super::RecipeVersion;
use semver::VersionReq;

/// One external dependency with its accepted version range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRange {
    pub name: &'static str,
    pub requirement: VersionReq,
}

impl DependencyRange {
    fn new(name: &'static str, range: &str) -> Self {
        Self {
            name,
            requirement: VersionReq::parse(range).expect("static version range must parse"),
        }
    }
}

/// Dependency ranges for one recipe version, in resolution order
pub fn dependency_ranges(version: RecipeVersion) -> Vec<DependencyRange> {
    let mut deps = vec![
        DependencyRange::new("jsoncpp", ">=1.9.5, <2"),
        DependencyRange::new("tinyxml2", ">=9.0.0, <10"),
        DependencyRange::new("libcurl", ">=7.86.0, <8"),
    ];
    if version == RecipeVersion::V2 {
        // 2.x adds compressed log transfer and the MAVLink events interface
        deps.push(DependencyRange::new("libzip", ">=1.9.2, <2"));
        deps.push(DependencyRange::new("libevents", ">=0.1.0, <1"));
    }
    deps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v1_set_matches_the_classic_three() {
        let names: Vec<_> = dependency_ranges(RecipeVersion::V1)
            .iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, ["jsoncpp", "tinyxml2", "libcurl"]);
    }

    #[test]
    fn v2_adds_codec_and_events_libraries() {
        let deps = dependency_ranges(RecipeVersion::V2);
        let names: Vec<_> = deps.iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            ["jsoncpp", "tinyxml2", "libcurl", "libzip", "libevents"]
        );
    }

    #[test]
    fn ranges_accept_expected_versions() {
        let deps = dependency_ranges(RecipeVersion::V1);
        let jsoncpp = &deps[0].requirement;
        assert!(jsoncpp.matches(&semver::Version::new(1, 9, 5)));
        assert!(!jsoncpp.matches(&semver::Version::new(2, 0, 0)));
    }
}
