use async_trait::async_trait;

use crate::error::GitError;

/// Filters for a history query. Every present filter must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogQuery {
    /// Only commits touching this path.
    pub file: Option<String>,
    /// Only commits reachable from HEAD but not from this revision, or, when
    /// it does not name a commit, only commits after this date.
    pub since: Option<String>,
    /// Only commits whose author matches this pattern.
    pub author: Option<String>,
}

/// One commit as reported by `git log`, before enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub hash: String,
    pub author: String,
    pub date: String,
    pub message: String,
    pub parents: Vec<String>,
}

/// The operations the history service needs from git.
///
/// Implemented by `CommandGitClient` for a real work tree; tests substitute an
/// in-memory fake.
#[async_trait]
pub trait GitClient: Send + Sync {
    /// Full, newest-first list of commits matching `query`.
    async fn log(&self, query: &LogQuery) -> Result<Vec<LogEntry>, GitError>;

    /// Resolve `rev` to a single commit. `Ok(None)` when git cannot resolve it.
    async fn find_commit(&self, rev: &str) -> Result<Option<LogEntry>, GitError>;

    /// Unified diff of `hash` against its first parent.
    async fn diff(&self, hash: &str) -> Result<String, GitError>;

    /// Paths touched by `hash` relative to its first parent.
    async fn changed_files(&self, hash: &str) -> Result<Vec<String>, GitError>;

    /// Porcelain blame output for `path` at HEAD.
    async fn blame(&self, path: &str) -> Result<String, GitError>;

    async fn tags(&self) -> Result<Vec<String>, GitError>;

    async fn branches(&self) -> Result<Vec<String>, GitError>;

    async fn branches_containing(&self, hash: &str) -> Result<Vec<String>, GitError>;

    async fn tags_containing(&self, hash: &str) -> Result<Vec<String>, GitError>;
}
