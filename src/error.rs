// src/error.rs

//! Crate-wide error taxonomy for the recipe pipeline
//!
//! Every stage failure aborts the pipeline; the error display names the
//! failing stage and the underlying cause so the terminal report is a
//! single line. Patch-level failures have their own enum in `patch::error`
//! and are wrapped here.

use crate::build::BuildStage;
use crate::patch::PatchError;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the recipe pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Source or submodule retrieval failed. Fatal, never retried here.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// Downloaded archive does not match its pinned checksum
    #[error("checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    /// A declared-mandatory rewrite could not be applied
    #[error("patch stage failed: {0}")]
    Patch(#[from] PatchError),

    /// Derived configuration is internally inconsistent
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The underlying build tool reported a non-zero exit
    #[error("{stage} stage failed with exit code {code}")]
    Build { stage: BuildStage, code: i32 },

    /// The test sub-stage reported a non-zero exit (distinct from a build failure)
    #[error("test stage failed with exit code {code}")]
    TestFailure { code: i32 },

    /// Expected build artifact missing at export time
    #[error("packaging failed: {0}")]
    Packaging(String),

    /// A required external tool is not on PATH
    #[error("required tool not found: {0}")]
    ToolNotFound(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
