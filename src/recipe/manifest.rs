// src/recipe/manifest.rs

//! Plugin manifest exposed to downstream consumers
//!
//! A single module-name list per recipe version is the source of truth;
//! the library-name and include-directory lists are derived from it, so
//! the two can never drift apart. System libraries are keyed by target
//! operating system.
//!
//! The manifest is static data: it describes what the recipe builds, not
//! what happens to be on disk. If a module is listed here but the catalog
//! stops building it, the mismatch surfaces at the consumer's link step.

use super::RecipeVersion;
use crate::configure::TargetOs;
use serde::Serialize;

/// Plugin modules built by the 1.4.x recipe
const V1_MODULES: &[&str] = &[
    "action",
    "calibration",
    "camera",
    "failure",
    "follow_me",
    "ftp",
    "geofence",
    "gimbal",
    "info",
    "log_files",
    "manual_control",
    "mavlink_passthrough",
    "mission",
    "mission_raw",
    "mocap",
    "offboard",
    "param",
    "server_utility",
    "shell",
    "telemetry",
    "tracking_server",
    "transponder",
    "tune",
];

/// Plugin modules built by the 2.x recipe
const V2_MODULES: &[&str] = &[
    "action",
    "calibration",
    "camera",
    "component_information",
    "failure",
    "follow_me",
    "ftp",
    "geofence",
    "gimbal",
    "gripper",
    "info",
    "log_files",
    "manual_control",
    "mavlink_passthrough",
    "mission",
    "mission_raw",
    "mocap",
    "offboard",
    "param",
    "server_utility",
    "shell",
    "telemetry",
    "tracking_server",
    "transponder",
    "tune",
    "winch",
];

/// Static capability description of one recipe's output
#[derive(Debug, Clone, Copy)]
pub struct PluginManifest {
    version: RecipeVersion,
}

impl PluginManifest {
    pub fn for_version(version: RecipeVersion) -> Self {
        Self { version }
    }

    /// Plugin module names, the single source of truth
    pub fn modules(&self) -> &'static [&'static str] {
        match self.version {
            RecipeVersion::V1 => V1_MODULES,
            RecipeVersion::V2 => V2_MODULES,
        }
    }

    /// Library names: the core library plus one `mavsdk_<module>` per module
    pub fn libs(&self) -> Vec<String> {
        std::iter::once("mavsdk".to_string())
            .chain(self.modules().iter().map(|m| format!("mavsdk_{m}")))
            .collect()
    }

    /// Include directories: the core headers plus one plugin header
    /// directory per module, in the same order as `libs`
    pub fn include_dirs(&self) -> Vec<String> {
        std::iter::once("include/mavsdk".to_string())
            .chain(
                self.modules()
                    .iter()
                    .map(|m| format!("include/mavsdk/plugins/{m}")),
            )
            .collect()
    }

    /// Platform system libraries the consumer must link
    pub fn system_libs(&self, os: TargetOs) -> &'static [&'static str] {
        match os {
            TargetOs::Linux => &["m", "dl", "pthread"],
            TargetOs::Windows => &["ws2_32"],
            TargetOs::Macos => &[],
        }
    }

    /// Serializable form for the exported manifest file
    pub fn export(&self, os: TargetOs) -> ManifestExport {
        ManifestExport {
            library_version: self.version.library_version().to_string(),
            libs: self.libs(),
            include_dirs: self.include_dirs(),
            system_libs: self
                .system_libs(os)
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// The manifest as written to the package directory
#[derive(Debug, Clone, Serialize)]
pub struct ManifestExport {
    pub library_version: String,
    pub libs: Vec<String>,
    pub include_dirs: Vec<String>,
    pub system_libs: Vec<String>,
}
