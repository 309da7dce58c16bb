// src/configure.rs

//! Configuration context generation
//!
//! Derives the toolchain variables handed verbatim to CMake from the
//! recipe version, the build options and the platform descriptors. The
//! derivation is a pure function of its arguments: calling it twice with
//! the same inputs yields a byte-identical context (the backing map is
//! ordered), and nothing is read from the environment.

use crate::error::{Error, Result};
use crate::recipe::{source_for, RecipeVersion};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumString};
use tracing::warn;

/// Target operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum TargetOs {
    Linux,
    Windows,
    Macos,
}

/// Compiler family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Compiler {
    Gcc,
    Clang,
    Msvc,
}

/// Platform descriptors as reported by the host tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub os: TargetOs,
    pub compiler: Compiler,
    /// Compiler runtime string (MSVC: `MT`, `MTd`, `MD`, `MDd`)
    pub runtime: Option<String>,
}

impl Platform {
    pub fn new(os: TargetOs, compiler: Compiler) -> Self {
        Self {
            os,
            compiler,
            runtime: None,
        }
    }

    pub fn with_runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = Some(runtime.into());
        self
    }

    /// Best-effort descriptor for the machine we are running on
    pub fn host() -> Self {
        let os = if cfg!(target_os = "windows") {
            TargetOs::Windows
        } else if cfg!(target_os = "macos") {
            TargetOs::Macos
        } else {
            TargetOs::Linux
        };
        let compiler = match os {
            TargetOs::Windows => Compiler::Msvc,
            TargetOs::Macos => Compiler::Clang,
            TargetOs::Linux => Compiler::Gcc,
        };
        Self::new(os, compiler)
    }
}

/// Boolean recipe options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    pub shared: bool,
    pub position_independent: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            shared: false,
            position_independent: true,
        }
    }
}

/// One configuration value, rendered into a `-D` flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Bool(bool),
    Str(String),
    Path(PathBuf),
}

impl ConfigValue {
    /// CMake cache rendering
    pub fn render(&self) -> String {
        match self {
            Self::Bool(true) => "ON".to_string(),
            Self::Bool(false) => "OFF".to_string(),
            Self::Str(s) => s.clone(),
            Self::Path(p) => p.display().to_string(),
        }
    }
}

/// The resolved variable set consumed as-is by the build tool
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigurationContext {
    values: BTreeMap<String, ConfigValue>,
}

impl ConfigurationContext {
    pub fn set(&mut self, name: impl Into<String>, value: ConfigValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.values.get(name)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(ConfigValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConfigValue)> {
        self.values.iter()
    }

    /// Render the context as `-DNAME=VALUE` arguments, in stable order
    pub fn cmake_args(&self) -> Vec<String> {
        self.values
            .iter()
            .map(|(name, value)| format!("-D{}={}", name, value.render()))
            .collect()
    }
}

/// Whether the recipe runs the wrapped library's test suite.
///
/// Unconditionally disabled in the current policy: the upstream suite
/// needs simulator endpoints this pipeline does not provide. The gate is
/// kept (and threaded through BUILD_TESTS and the driver's ctest stage) so
/// re-enabling is a one-line change here, not an archaeology project.
pub fn testing_enabled() -> bool {
    false
}

/// Derive the configuration context for one build
pub fn generate(
    version: RecipeVersion,
    options: BuildOptions,
    platform: &Platform,
    root: &Path,
) -> Result<ConfigurationContext> {
    validate(platform)?;

    let mut ctx = ConfigurationContext::default();
    ctx.set("SUPERBUILD", ConfigValue::Bool(false));
    ctx.set("BUILD_MAVSDK_SERVER", ConfigValue::Bool(false));
    ctx.set("BUILD_TESTS", ConfigValue::Bool(testing_enabled()));
    ctx.set(
        "CMAKE_MINIMUM_REQUIRED_VERSION",
        ConfigValue::Str("3.13".to_string()),
    );
    ctx.set("BUILD_SHARED_LIBS", ConfigValue::Bool(options.shared));

    // Position-independent code is implied for shared builds and has no
    // meaning on Windows; in both cases the variable must be absent from
    // the context, not set to false.
    let pic_applicable = !options.shared && platform.os != TargetOs::Windows;
    if pic_applicable && options.position_independent {
        ctx.set("CMAKE_POSITION_INDEPENDENT_CODE", ConfigValue::Bool(true));
    }

    // Include root for the pinned MAVLink headers, derived from the fixed
    // acquisition layout rather than hand-entered.
    let spec = source_for(version);
    ctx.set(
        "MAVLINK_INCLUDE_DIR",
        ConfigValue::Path(root.join(spec.mavlink_include_offset)),
    );

    if platform.os == TargetOs::Windows && platform.compiler == Compiler::Msvc {
        if let Some(runtime) = platform.runtime.as_deref() {
            match msvc_runtime_library(runtime) {
                Some(value) => {
                    ctx.set(
                        "CMAKE_POLICY_DEFAULT_CMP0091",
                        ConfigValue::Str("NEW".to_string()),
                    );
                    ctx.set(
                        "CMAKE_MSVC_RUNTIME_LIBRARY",
                        ConfigValue::Str(value.to_string()),
                    );
                }
                // Unknown runtime strings leave the selection to CMake
                // rather than guessing.
                None => warn!("unrecognized MSVC runtime '{}', leaving unset", runtime),
            }
        }
    }

    Ok(ctx)
}

/// Map an MSVC runtime string to the CMake runtime-library value.
///
/// Parsing is case-sensitive: the linkage marker is the uppercase second
/// letter, the debug marker a trailing lowercase `d`.
fn msvc_runtime_library(runtime: &str) -> Option<&'static str> {
    match runtime {
        "MT" => Some("MultiThreaded"),
        "MTd" => Some("MultiThreadedDebug"),
        "MD" => Some("MultiThreadedDLL"),
        "MDd" => Some("MultiThreadedDebugDLL"),
        _ => None,
    }
}

/// Reject internally inconsistent platform descriptions before any build
/// tool is invoked
fn validate(platform: &Platform) -> Result<()> {
    if platform.runtime.is_some()
        && (platform.os != TargetOs::Windows || platform.compiler != Compiler::Msvc)
    {
        return Err(Error::Configuration(format!(
            "compiler runtime '{}' only applies to MSVC on Windows (got {} / {})",
            platform.runtime.as_deref().unwrap_or(""),
            platform.os,
            platform.compiler
        )));
    }
    Ok(())
}
