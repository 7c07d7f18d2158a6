//! Diff DTOs.
//!
//! Used by: the diff viewer, one entry per file section of a commit's diff.

use serde::{Deserialize, Serialize};

/// Changes to one file in a unified diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffFile {
    /// Path from the `b/` side of the section header; empty if the header was malformed.
    pub file: String,
    pub additions: usize,
    pub deletions: usize,
    /// Hunk headers, file headers, context and changed lines joined with `\n`.
    pub changes: String,
}
