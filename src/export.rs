// src/export.rs

//! Package export
//!
//! Lays out the package directory for downstream consumers: the license
//! under `licenses/`, no build-tool-generated cmake config (consumers must
//! use the emitted manifest instead), shared-library artifacts under
//! `bin/` for shared builds, and the plugin manifest as JSON.

use crate::configure::TargetOs;
use crate::error::{Error, Result};
use crate::recipe::PluginManifest;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Name of the manifest file written into the package root
pub const MANIFEST_FILE: &str = "mavforge-manifest.json";

/// Export inputs: where things are and what was built
pub struct ExportRequest<'a> {
    /// Patched source tree (for the license file)
    pub source_dir: &'a Path,
    /// CMake build tree (for shared-library artifacts)
    pub build_dir: &'a Path,
    /// Installed package root, already populated by the install stage
    pub package_dir: &'a Path,
    pub manifest: PluginManifest,
    pub shared: bool,
    pub os: TargetOs,
}

/// Produce the final package layout. Never exports a partial package: any
/// failure leaves the caller to discard the directory.
pub fn export(req: &ExportRequest<'_>) -> Result<()> {
    copy_license(req.source_dir, req.package_dir)?;
    remove_cmake_config(req.package_dir)?;
    if req.shared {
        copy_shared_artifacts(req.build_dir, req.package_dir, req.os)?;
    }
    write_manifest(req.package_dir, &req.manifest, req.os)?;
    info!("exported package at {}", req.package_dir.display());
    Ok(())
}

fn copy_license(source_dir: &Path, package_dir: &Path) -> Result<()> {
    let license = source_dir.join("LICENSE");
    if !license.exists() {
        return Err(Error::Packaging(format!(
            "license file missing at {}",
            license.display()
        )));
    }
    let licenses_dir = package_dir.join("licenses");
    fs::create_dir_all(&licenses_dir)?;
    fs::copy(&license, licenses_dir.join("LICENSE"))?;
    Ok(())
}

/// Drop the build tool's auto-generated find-package config; the manifest
/// is the supported consumption surface
fn remove_cmake_config(package_dir: &Path) -> Result<()> {
    let cmake_dir = package_dir.join("lib").join("cmake");
    if cmake_dir.exists() {
        debug!("removing {}", cmake_dir.display());
        fs::remove_dir_all(&cmake_dir)?;
    }
    Ok(())
}

/// Dynamic-library naming pattern per target OS, rooted in the build tree
fn artifact_patterns(os: TargetOs) -> &'static [&'static str] {
    match os {
        TargetOs::Windows => &["src/**/*mavsdk*.dll"],
        TargetOs::Linux => &["src/**/lib*mavsdk*.so*"],
        TargetOs::Macos => &["src/**/lib*mavsdk*.dylib"],
    }
}

fn copy_shared_artifacts(build_dir: &Path, package_dir: &Path, os: TargetOs) -> Result<()> {
    let bin_dir = package_dir.join("bin");
    fs::create_dir_all(&bin_dir)?;

    let mut copied = 0usize;
    for pattern in artifact_patterns(os) {
        let full = build_dir.join(pattern);
        let full = full.to_str().ok_or_else(|| {
            Error::Packaging(format!("non-UTF-8 build path: {}", build_dir.display()))
        })?;
        let entries = glob::glob(full)
            .map_err(|e| Error::Packaging(format!("bad artifact pattern '{pattern}': {e}")))?;
        for entry in entries {
            let path =
                entry.map_err(|e| Error::Packaging(format!("artifact walk failed: {e}")))?;
            let Some(name) = path.file_name() else { continue };
            // keep_path=false: artifacts land flat in bin/
            fs::copy(&path, bin_dir.join(name))?;
            debug!("copied artifact {}", path.display());
            copied += 1;
        }
    }

    if copied == 0 {
        return Err(Error::Packaging(format!(
            "shared build produced no dynamic-library artifacts under {}",
            build_dir.display()
        )));
    }
    Ok(())
}

fn write_manifest(package_dir: &Path, manifest: &PluginManifest, os: TargetOs) -> Result<()> {
    fs::create_dir_all(package_dir)?;
    let export = manifest.export(os);
    let json = serde_json::to_string_pretty(&export)
        .map_err(|e| Error::Packaging(format!("manifest serialization failed: {e}")))?;
    fs::write(package_dir.join(MANIFEST_FILE), json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::RecipeVersion;
    use tempfile::TempDir;

    struct Fixture {
        _root: TempDir,
        source: std::path::PathBuf,
        build: std::path::PathBuf,
        package: std::path::PathBuf,
    }

    fn fixture(shared_artifact: Option<&str>) -> Fixture {
        let root = TempDir::new().unwrap();
        let source = root.path().join("src");
        let build = root.path().join("build");
        let package = root.path().join("pkg");
        fs::create_dir_all(&source).unwrap();
        fs::create_dir_all(build.join("src/mavsdk")).unwrap();
        fs::create_dir_all(package.join("lib/cmake/MAVSDK")).unwrap();
        fs::write(source.join("LICENSE"), "BSD-3-Clause\n").unwrap();
        fs::write(package.join("lib/cmake/MAVSDK/MAVSDKConfig.cmake"), "x\n").unwrap();
        if let Some(name) = shared_artifact {
            fs::write(build.join("src/mavsdk").join(name), b"\x7fELF").unwrap();
        }
        Fixture {
            _root: root,
            source,
            build,
            package,
        }
    }

    #[test]
    fn static_export_lays_out_license_and_manifest_without_bin() {
        let fx = fixture(None);
        let req = ExportRequest {
            source_dir: &fx.source,
            build_dir: &fx.build,
            package_dir: &fx.package,
            manifest: PluginManifest::for_version(RecipeVersion::V1),
            shared: false,
            os: TargetOs::Linux,
        };
        export(&req).expect("export");

        assert!(fx.package.join("licenses/LICENSE").exists());
        assert!(!fx.package.join("lib/cmake").exists());
        assert!(!fx.package.join("bin").exists());
        assert!(fx.package.join(MANIFEST_FILE).exists());
    }

    #[test]
    fn shared_export_copies_matched_artifacts_into_bin() {
        let fx = fixture(Some("libmavsdk.so.1.4.16"));
        let req = ExportRequest {
            source_dir: &fx.source,
            build_dir: &fx.build,
            package_dir: &fx.package,
            manifest: PluginManifest::for_version(RecipeVersion::V1),
            shared: true,
            os: TargetOs::Linux,
        };
        export(&req).expect("export");
        assert!(fx.package.join("bin/libmavsdk.so.1.4.16").exists());
    }

    #[test]
    fn shared_export_with_no_artifacts_is_a_packaging_error() {
        let fx = fixture(None);
        let req = ExportRequest {
            source_dir: &fx.source,
            build_dir: &fx.build,
            package_dir: &fx.package,
            manifest: PluginManifest::for_version(RecipeVersion::V1),
            shared: true,
            os: TargetOs::Linux,
        };
        let err = export(&req).expect_err("manifest/reality mismatch");
        assert!(matches!(err, Error::Packaging(_)));
    }

    #[test]
    fn missing_license_aborts_the_export() {
        let fx = fixture(None);
        fs::remove_file(fx.source.join("LICENSE")).unwrap();
        let req = ExportRequest {
            source_dir: &fx.source,
            build_dir: &fx.build,
            package_dir: &fx.package,
            manifest: PluginManifest::for_version(RecipeVersion::V1),
            shared: false,
            os: TargetOs::Linux,
        };
        let err = export(&req).expect_err("license required");
        assert!(matches!(err, Error::Packaging(_)));
    }

    #[test]
    fn manifest_file_contains_the_derived_lists() {
        let fx = fixture(None);
        let req = ExportRequest {
            source_dir: &fx.source,
            build_dir: &fx.build,
            package_dir: &fx.package,
            manifest: PluginManifest::for_version(RecipeVersion::V1),
            shared: false,
            os: TargetOs::Linux,
        };
        export(&req).expect("export");

        let raw = fs::read_to_string(fx.package.join(MANIFEST_FILE)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["libs"][0], "mavsdk");
        assert_eq!(json["include_dirs"][0], "include/mavsdk");
        assert_eq!(json["system_libs"], serde_json::json!(["m", "dl", "pthread"]));
        assert_eq!(
            json["libs"].as_array().unwrap().len(),
            json["include_dirs"].as_array().unwrap().len()
        );
    }
}
