// src/patch/mod.rs

//! Text-rewrite engine for third-party build scripts
//!
//! The recipe does not own the files it modifies: upstream CMake lists and
//! headers change between releases, so every operation here is written to
//! tolerate text that has already been rewritten or has moved. There is no
//! parser — all operations are exact-substring, line-oriented transforms:
//!
//! - **LiteralReplace**: replace every occurrence of a needle; absence is a
//!   no-op, never a failure at the engine level.
//! - **BlockDelete**: delete from a marker line through the line where a
//!   delimiter counter returns to zero. Reaching end-of-file with the
//!   counter still positive is a hard error, never a silent truncation.
//! - **CommentMatching**: prefix every line containing a needle with a
//!   comment marker, preserving line count for positional diffability.
//! - **Prepend**: insert text at the top of the file unless it is already
//!   there.
//! - **Rewrite**: replace the whole content.
//!
//! Every operation is idempotent: applying it to its own output changes
//! nothing. The file-level driver commits atomically (temp file + rename)
//! and supports a dry-run mode that returns unified diffs instead of
//! writing.
//!
//! Known limitation: delimiter counting is substring counting per line. A
//! close token that shares a line with unrelated text terminates the block
//! on that line. This is inherent to patching without a parser.

mod error;
mod op;
mod patcher;

pub use error::PatchError;
pub use op::{ApplyOutcome, BalanceRule, PatchOp};
pub use patcher::{PatchPreview, Patcher, ScriptedPatch};
