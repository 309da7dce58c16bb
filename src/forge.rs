// src/forge.rs

//! Pipeline orchestration
//!
//! `Forge` runs the fixed stage order for one recipe invocation:
//! fetch → patch → configure → build → export. Strictly sequential; each
//! stage reads files the previous stage committed to disk. The invocation
//! owns its work directory exclusively — serializing concurrent recipe
//! runs against the same directory is the caller's job.

use crate::build::BuildDriver;
use crate::configure::{self, BuildOptions, Platform};
use crate::error::Result;
use crate::export::{self, ExportRequest};
use crate::patch::Patcher;
use crate::recipe::{operations_for, PluginManifest, RecipeVersion};
use crate::source;
use std::path::{Path, PathBuf};
use tracing::info;

/// Configuration for a recipe run
#[derive(Debug, Clone)]
pub struct ForgeConfig {
    /// Directory for downloaded source archives, reused across runs
    pub source_cache: PathBuf,
    pub options: BuildOptions,
    pub platform: Platform,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            source_cache: std::env::temp_dir().join("mavforge-sources"),
            options: BuildOptions::default(),
            platform: Platform::host(),
        }
    }
}

/// Result of a completed recipe run
#[derive(Debug)]
pub struct ForgeResult {
    pub package_dir: PathBuf,
}

/// Drives one recipe version through the whole pipeline
pub struct Forge {
    config: ForgeConfig,
}

impl Forge {
    pub fn new(config: ForgeConfig) -> Self {
        Self { config }
    }

    /// Run the full pipeline. `workdir` receives the source and build
    /// trees; `package_dir` receives the final package layout. Aborting
    /// mid-run leaves `workdir` safe to discard and re-fetch from scratch.
    pub fn run(
        &self,
        version: RecipeVersion,
        workdir: &Path,
        package_dir: &Path,
    ) -> Result<ForgeResult> {
        let source_dir = workdir.join("src");
        let build_dir = workdir.join("build");

        info!("fetching sources for mavsdk {}", version.library_version());
        source::fetch(version, &source_dir, &self.config.source_cache)?;

        info!("applying patch catalog");
        let patcher = Patcher::new(&source_dir);
        patcher.apply_all(&operations_for(version))?;

        info!("generating configuration context");
        let ctx = configure::generate(
            version,
            self.config.options,
            &self.config.platform,
            &source_dir,
        )?;

        let driver = BuildDriver::new(&source_dir, &build_dir);
        driver.run(&ctx)?;
        driver.install(package_dir)?;

        info!("exporting package");
        export::export(&ExportRequest {
            source_dir: &source_dir,
            build_dir: &build_dir,
            package_dir,
            manifest: PluginManifest::for_version(version),
            shared: self.config.options.shared,
            os: self.config.platform.os,
        })?;

        Ok(ForgeResult {
            package_dir: package_dir.to_path_buf(),
        })
    }
}
