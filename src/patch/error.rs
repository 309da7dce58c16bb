// src/patch/error.rs
//! Error types for the patch engine

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while applying patch operations
#[derive(Error, Debug)]
pub enum PatchError {
    /// Target file does not exist in the source tree
    #[error("target file not found: {0}")]
    FileNotFound(PathBuf),

    /// A block deletion reached end-of-file before its delimiter counter
    /// returned to zero
    #[error("unterminated block starting at '{marker}'")]
    UnterminatedBlock { marker: String },

    /// A mandatory rewrite found nothing to change
    #[error("required text absent: '{needle}' in {file}")]
    RequiredTextAbsent { needle: String, file: PathBuf },

    /// I/O error while reading or committing a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
