// src/build.rs

//! Build/Test driver
//!
//! Invokes CMake configure, build and install, plus an optional ctest run
//! gated on the BUILD_TESTS value in the configuration context. Stage
//! order is fixed; any non-zero exit aborts the remaining stages. A test
//! failure is reported distinctly from a build failure.

use crate::configure::ConfigurationContext;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Pipeline stages driven through the underlying build tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    Configure,
    Compile,
    Install,
    Test,
}

impl BuildStage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Configure => "configure",
            Self::Compile => "build",
            Self::Install => "install",
            Self::Test => "test",
        }
    }
}

impl std::fmt::Display for BuildStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Environment override applied only to the test invocation
const TEST_ENV: (&str, &str) = ("CTEST_OUTPUT_ON_FAILURE", "ON");

/// Drives cmake/ctest against one source and build tree
pub struct BuildDriver {
    source_dir: PathBuf,
    build_dir: PathBuf,
}

impl BuildDriver {
    pub fn new(source_dir: impl Into<PathBuf>, build_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            build_dir: build_dir.into(),
        }
    }

    /// The stages this context will run, in order. The test stage appears
    /// only when the testing gate in the context is true.
    pub fn plan(ctx: &ConfigurationContext) -> Vec<BuildStage> {
        let mut stages = vec![BuildStage::Configure, BuildStage::Compile];
        if Self::testing_gate(ctx) {
            stages.push(BuildStage::Test);
        }
        stages
    }

    /// The single authoritative gate for the test sub-stage
    pub fn testing_gate(ctx: &ConfigurationContext) -> bool {
        ctx.get_bool("BUILD_TESTS").unwrap_or(false)
    }

    /// Run configure, build and (when gated on) tests
    pub fn run(&self, ctx: &ConfigurationContext) -> Result<()> {
        self.configure(ctx)?;
        self.compile()?;
        if Self::testing_gate(ctx) {
            self.test()?;
        } else {
            debug!("testing gate is off, skipping test stage");
        }
        Ok(())
    }

    fn configure(&self, ctx: &ConfigurationContext) -> Result<()> {
        info!("configuring in {}", self.build_dir.display());
        let cmake = cmake()?;
        let mut cmd = Command::new(cmake);
        cmd.arg("-S")
            .arg(&self.source_dir)
            .arg("-B")
            .arg(&self.build_dir)
            .args(ctx.cmake_args());
        run_stage(cmd, BuildStage::Configure)
    }

    fn compile(&self) -> Result<()> {
        info!("building in {}", self.build_dir.display());
        let cmake = cmake()?;
        let mut cmd = Command::new(cmake);
        cmd.arg("--build").arg(&self.build_dir);
        run_stage(cmd, BuildStage::Compile)
    }

    /// Install the built tree into `prefix`
    pub fn install(&self, prefix: &Path) -> Result<()> {
        info!("installing into {}", prefix.display());
        let cmake = cmake()?;
        let mut cmd = Command::new(cmake);
        cmd.arg("--install")
            .arg(&self.build_dir)
            .arg("--prefix")
            .arg(prefix);
        run_stage(cmd, BuildStage::Install)
    }

    fn test(&self) -> Result<()> {
        info!("running tests in {}", self.build_dir.display());
        let ctest = which::which("ctest").map_err(|_| Error::ToolNotFound("ctest".to_string()))?;
        let output = Command::new(ctest)
            .current_dir(&self.build_dir)
            .env(TEST_ENV.0, TEST_ENV.1)
            .output()
            .map_err(Error::Io)?;

        if !output.status.success() {
            debug!("ctest output:\n{}", String::from_utf8_lossy(&output.stdout));
            return Err(Error::TestFailure {
                code: output.status.code().unwrap_or(-1),
            });
        }
        Ok(())
    }
}

fn cmake() -> Result<PathBuf> {
    which::which("cmake").map_err(|_| Error::ToolNotFound("cmake".to_string()))
}

fn run_stage(mut cmd: Command, stage: BuildStage) -> Result<()> {
    debug!("running {:?}", cmd);
    let output = cmd.output().map_err(Error::Io)?;
    if !output.status.success() {
        debug!(
            "{} stderr:\n{}",
            stage,
            String::from_utf8_lossy(&output.stderr)
        );
        return Err(Error::Build {
            stage,
            code: output.status.code().unwrap_or(-1),
        });
    }
    Ok(())
}
