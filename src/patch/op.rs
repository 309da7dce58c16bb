// src/patch/op.rs

//! Pure content transforms
//!
//! `PatchOp::apply` maps file content to new file content without touching
//! the filesystem, so every operation is testable in isolation and the
//! caller can commit atomically (or render a diff) only on success.

use super::error::PatchError;

/// Sentinel used to shield already-applied replacement text from a second
/// substitution pass. Never occurs in the build scripts this engine edits.
const MASK: &str = "\u{0}";

/// Outcome of applying an operation to content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The content was modified
    Changed,
    /// The content already reflects this operation; nothing to do
    AlreadyApplied,
    /// The operation's target text was not found
    NoMatch,
}

/// Termination rule for a block deletion
///
/// The counter is seeded at 1 when the line containing the start marker is
/// consumed. For each subsequent line the counter gains one per `open`
/// occurrence and loses one per `close` occurrence; the line on which it
/// first reaches zero is the last line deleted. Tokens on the marker line
/// itself are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceRule {
    /// Token that opens a nested block (e.g. `if(`); `None` means only
    /// close tokens are counted
    pub open: Option<String>,
    /// Token that closes a block (e.g. `endif(`)
    pub close: String,
}

impl BalanceRule {
    /// Rule that terminates on the first line containing `close`
    pub fn closing(close: impl Into<String>) -> Self {
        Self {
            open: None,
            close: close.into(),
        }
    }

    /// Rule that tracks nesting via `open`/`close` pairs
    pub fn nested(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: Some(open.into()),
            close: close.into(),
        }
    }

    /// Net counter delta contributed by one line
    fn delta(&self, line: &str) -> i64 {
        let closes = line.matches(self.close.as_str()).count() as i64;
        let mut opens = match &self.open {
            Some(open) => line.matches(open.as_str()).count() as i64,
            None => 0,
        };
        // An open token that is a substring of the close token (CMake's
        // `if(` inside `endif(`) would be double-counted; subtract the
        // occurrences swallowed by close tokens.
        if let Some(open) = &self.open {
            if self.close.contains(open.as_str()) {
                let per_close = self.close.matches(open.as_str()).count() as i64;
                opens = (opens - closes * per_close).max(0);
            }
        }
        opens - closes
    }
}

/// One declarative text transformation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOp {
    /// Replace every occurrence of `needle` with `replacement`.
    /// Absence of the needle is a no-op, never an engine-level failure.
    LiteralReplace { needle: String, replacement: String },

    /// Delete from the first line containing `start_marker` through the
    /// line where `balance` first returns the counter to zero, inclusive
    BlockDelete {
        start_marker: String,
        balance: BalanceRule,
    },

    /// Prefix every line containing `needle` with `marker`, preserving
    /// line count and order
    CommentMatching { needle: String, marker: String },

    /// Insert `text` at the very top of the file unless already present
    Prepend { text: String },

    /// Replace the entire content
    Rewrite { content: String },
}

impl PatchOp {
    /// Shorthand constructor for the most common operation
    pub fn replace(needle: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self::LiteralReplace {
            needle: needle.into(),
            replacement: replacement.into(),
        }
    }

    /// Shorthand constructor for deleting a single line or statement
    pub fn delete_line(needle: impl Into<String>) -> Self {
        Self::LiteralReplace {
            needle: needle.into(),
            replacement: String::new(),
        }
    }

    /// Apply this operation to `content`, returning the new content and
    /// what happened. Pure; the caller owns all filesystem effects.
    pub fn apply(&self, content: &str) -> Result<(String, ApplyOutcome), PatchError> {
        match self {
            Self::LiteralReplace {
                needle,
                replacement,
            } => Ok(literal_replace(content, needle, replacement)),
            Self::BlockDelete {
                start_marker,
                balance,
            } => block_delete(content, start_marker, balance),
            Self::CommentMatching { needle, marker } => {
                Ok(comment_matching(content, needle, marker))
            }
            Self::Prepend { text } => Ok(prepend(content, text)),
            Self::Rewrite { content: target } => {
                if content == target {
                    Ok((content.to_string(), ApplyOutcome::AlreadyApplied))
                } else {
                    Ok((target.clone(), ApplyOutcome::Changed))
                }
            }
        }
    }

    /// The text this operation searches for, used in failure reports
    pub fn target_text(&self) -> &str {
        match self {
            Self::LiteralReplace { needle, .. } => needle,
            Self::BlockDelete { start_marker, .. } => start_marker,
            Self::CommentMatching { needle, .. } => needle,
            Self::Prepend { text } => text,
            Self::Rewrite { .. } => "<whole file>",
        }
    }
}

fn literal_replace(content: &str, needle: &str, replacement: &str) -> (String, ApplyOutcome) {
    if needle.is_empty() {
        return (content.to_string(), ApplyOutcome::AlreadyApplied);
    }

    // When the replacement still contains the needle (an insertion around
    // the original text), mask already-rewritten spans so a replay cannot
    // stack the insertion a second time.
    let self_embedding = !replacement.is_empty() && replacement.contains(needle);
    let masked = if self_embedding && content.contains(replacement) {
        content.replace(replacement, MASK)
    } else {
        content.to_string()
    };

    if masked.contains(needle) {
        let rewritten = masked.replace(needle, replacement).replace(MASK, replacement);
        return (rewritten, ApplyOutcome::Changed);
    }

    let outcome = if replacement.is_empty() {
        // Deletion: absence of the needle is indistinguishable from a
        // prior application and counts as success.
        ApplyOutcome::AlreadyApplied
    } else if content.contains(replacement) {
        ApplyOutcome::AlreadyApplied
    } else {
        ApplyOutcome::NoMatch
    };
    (content.to_string(), outcome)
}

fn block_delete(
    content: &str,
    start_marker: &str,
    balance: &BalanceRule,
) -> Result<(String, ApplyOutcome), PatchError> {
    let lines: Vec<&str> = content.split_inclusive('\n').collect();

    let Some(start) = lines.iter().position(|l| l.contains(start_marker)) else {
        // Absence of the marker is the post-deletion state.
        return Ok((content.to_string(), ApplyOutcome::AlreadyApplied));
    };

    let mut counter: i64 = 1;
    let mut end = None;
    for (idx, line) in lines.iter().enumerate().skip(start + 1) {
        counter += balance.delta(line);
        if counter <= 0 {
            end = Some(idx);
            break;
        }
    }

    let Some(end) = end else {
        return Err(PatchError::UnterminatedBlock {
            marker: start_marker.to_string(),
        });
    };

    let mut out = String::with_capacity(content.len());
    for line in &lines[..start] {
        out.push_str(line);
    }
    for line in &lines[end + 1..] {
        out.push_str(line);
    }
    Ok((out, ApplyOutcome::Changed))
}

fn comment_matching(content: &str, needle: &str, marker: &str) -> (String, ApplyOutcome) {
    let mut changed = false;
    let mut already = false;
    let mut out = String::with_capacity(content.len() + marker.len());

    for line in content.split_inclusive('\n') {
        let body = line.trim_end_matches(['\n', '\r']);
        if body.contains(needle) {
            if body.trim_start().starts_with(marker) {
                already = true;
                out.push_str(line);
            } else {
                changed = true;
                out.push_str(marker);
                out.push_str(line);
            }
        } else {
            out.push_str(line);
        }
    }

    let outcome = if changed {
        ApplyOutcome::Changed
    } else if already {
        ApplyOutcome::AlreadyApplied
    } else {
        ApplyOutcome::NoMatch
    };
    (out, outcome)
}

fn prepend(content: &str, text: &str) -> (String, ApplyOutcome) {
    if content.starts_with(text) {
        (content.to_string(), ApplyOutcome::AlreadyApplied)
    } else {
        let mut out = String::with_capacity(content.len() + text.len());
        out.push_str(text);
        out.push_str(content);
        (out, ApplyOutcome::Changed)
    }
}
