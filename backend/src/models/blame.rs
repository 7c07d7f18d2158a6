//! Blame data transfer objects.
//!
//! Provides per-line author attribution for a file at HEAD.
//! Used by the blame viewer to show who last modified each line.

use serde::{Deserialize, Serialize};

/// Blame information for a single line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlameLine {
    /// Line number (1-indexed, sequential in output order)
    pub line: usize,
    /// Commit that last modified this line
    pub hash: String,
    /// Name of the author who last modified this line
    pub author: String,
    /// ISO-8601 author time, empty when git did not report one
    pub date: String,
    /// The source line without its leading tab
    pub content: String,
}
