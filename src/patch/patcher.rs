// src/patch/patcher.rs

//! File-level patch driver
//!
//! `Patcher` binds pure operations to a source tree: it reads the target
//! file, applies the transform, and commits the result atomically (temp
//! file in the same directory, then rename). `preview` renders the same
//! transforms as unified diffs without writing anything, so a catalog can
//! be audited against a real tree before it is allowed to mutate it.

use super::error::PatchError;
use super::op::{ApplyOutcome, PatchOp};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One catalog entry: an operation bound to a file, with an optionality flag
///
/// `required = false` means the target text may legitimately be absent in
/// some upstream point releases; such an entry degrades to a logged no-op
/// instead of failing the recipe.
#[derive(Debug, Clone)]
pub struct ScriptedPatch {
    /// Path relative to the source tree root
    pub file: &'static str,
    pub op: PatchOp,
    pub required: bool,
}

impl ScriptedPatch {
    pub fn required(file: &'static str, op: PatchOp) -> Self {
        Self {
            file,
            op,
            required: true,
        }
    }

    pub fn optional(file: &'static str, op: PatchOp) -> Self {
        Self {
            file,
            op,
            required: false,
        }
    }
}

/// A rendered dry-run result for one file
#[derive(Debug)]
pub struct PatchPreview {
    pub file: PathBuf,
    /// Unified diff from current content to patched content
    pub diff: String,
}

/// Applies scripted patches to a source tree
pub struct Patcher {
    root: PathBuf,
}

impl Patcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Apply a whole catalog in order, committing each file atomically.
    ///
    /// Re-running against already-patched output is safe: every operation
    /// is idempotent and reports `AlreadyApplied` instead of failing.
    pub fn apply_all(&self, patches: &[ScriptedPatch]) -> Result<(), PatchError> {
        for patch in patches {
            self.apply_one(patch)?;
        }
        Ok(())
    }

    fn apply_one(&self, patch: &ScriptedPatch) -> Result<ApplyOutcome, PatchError> {
        let path = self.root.join(patch.file);
        let Some(content) = self.read_target(patch, &path)? else {
            return Ok(ApplyOutcome::NoMatch);
        };

        let (rewritten, outcome) = patch.op.apply(&content)?;
        match outcome {
            ApplyOutcome::Changed => {
                commit(&path, &rewritten)?;
                debug!("patched {}", patch.file);
            }
            ApplyOutcome::AlreadyApplied => {
                debug!("already applied: {}", patch.file);
            }
            ApplyOutcome::NoMatch => {
                if patch.required {
                    return Err(PatchError::RequiredTextAbsent {
                        needle: patch.op.target_text().to_string(),
                        file: path,
                    });
                }
                warn!(
                    "optional patch skipped, text absent: '{}' in {}",
                    patch.op.target_text(),
                    patch.file
                );
            }
        }
        Ok(outcome)
    }

    /// Dry-run a catalog: return a unified diff per file that would change.
    /// Never writes. Optionality is honored the same way as `apply_all`.
    pub fn preview(&self, patches: &[ScriptedPatch]) -> Result<Vec<PatchPreview>, PatchError> {
        // Later entries must see earlier entries' effects, so track the
        // would-be content per file in memory.
        let mut staged: Vec<(PathBuf, String, String)> = Vec::new();

        for patch in patches {
            let path = self.root.join(patch.file);
            let current = match staged.iter().find(|(p, _, _)| *p == path) {
                Some((_, _, content)) => Some(content.clone()),
                None => self.read_target(patch, &path)?,
            };
            let Some(current) = current else { continue };

            let (rewritten, outcome) = patch.op.apply(&current)?;
            match outcome {
                ApplyOutcome::Changed => {
                    match staged.iter_mut().find(|(p, _, _)| *p == path) {
                        Some((_, _, content)) => *content = rewritten,
                        None => staged.push((path, current, rewritten)),
                    }
                }
                ApplyOutcome::AlreadyApplied => {}
                ApplyOutcome::NoMatch if patch.required => {
                    return Err(PatchError::RequiredTextAbsent {
                        needle: patch.op.target_text().to_string(),
                        file: path,
                    });
                }
                ApplyOutcome::NoMatch => {}
            }
        }

        Ok(staged
            .into_iter()
            .map(|(file, original, patched)| PatchPreview {
                diff: diffy::create_patch(&original, &patched).to_string(),
                file,
            })
            .collect())
    }

    /// Read the target file, honoring the optionality flag for missing files
    fn read_target(
        &self,
        patch: &ScriptedPatch,
        path: &Path,
    ) -> Result<Option<String>, PatchError> {
        if !path.exists() {
            if patch.required {
                return Err(PatchError::FileNotFound(path.to_path_buf()));
            }
            warn!("optional patch skipped, file missing: {}", patch.file);
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }
}

/// Write content to a temp file beside the target, then rename into place.
/// A failed apply never leaves a partially written file behind.
fn commit(path: &Path, content: &str) -> Result<(), PatchError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    use std::io::Write;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(path).map_err(|e| PatchError::Io(e.error))?;
    Ok(())
}
