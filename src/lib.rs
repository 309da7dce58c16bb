// src/lib.rs

//! mavforge
//!
//! A dependency-and-build recipe engine for MAVSDK: fetches a pinned
//! release and its MAVLink header submodule, rewrites the upstream build
//! scripts so the library builds against externally supplied dependencies
//! instead of its vendored copies, drives the CMake build, and packages
//! the artifacts with an exported capability manifest.
//!
//! # Architecture
//!
//! - `patch`: pure, file-scoped text transforms with idempotence and
//!   dry-run guarantees — the engine at the core of the recipe
//! - `recipe`: per-version catalogs, dependency ranges, source pins and
//!   the derived plugin manifest
//! - `source`: pinned archive and exact-commit retrieval
//! - `configure`: pure derivation of the CMake variable set
//! - `build`: configure/build/install plus the gated test stage
//! - `export`: final package layout and manifest emission
//! - `forge`: the sequential pipeline tying the stages together

pub mod build;
pub mod configure;
mod error;
pub mod export;
mod forge;
pub mod patch;
pub mod recipe;
pub mod source;

pub use configure::{BuildOptions, Compiler, ConfigurationContext, ConfigValue, Platform, TargetOs};
pub use error::{Error, Result};
pub use forge::{Forge, ForgeConfig, ForgeResult};
pub use patch::{ApplyOutcome, BalanceRule, PatchError, PatchOp, PatchPreview, Patcher, ScriptedPatch};
pub use recipe::{
    dependency_ranges, operations_for, source_for, DependencyRange, ManifestExport,
    PluginManifest, RecipeVersion, SourceSpec,
};
