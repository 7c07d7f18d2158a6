//! In-memory `GitClient` for service and route tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::GitError;
use crate::git::client::{GitClient, LogEntry, LogQuery};

#[derive(Default)]
pub struct FakeGitClient {
    pub entries: Vec<LogEntry>,
    pub diff_text: String,
    pub blame_text: String,
    pub files: HashMap<String, Vec<String>>,
    pub tags: Vec<String>,
    pub branches: Vec<String>,
    pub branches_containing: Vec<String>,
    pub tags_containing: Vec<String>,
    /// Operation names (`"log"`, `"tags_containing"`, ...) that fail.
    pub failing: HashSet<&'static str>,
    pub log_calls: AtomicUsize,
    pub last_query: Mutex<Option<LogQuery>>,
    /// Per-commit lookups currently running, and the most seen at once.
    pub in_flight: AtomicUsize,
    pub peak_in_flight: AtomicUsize,
}

impl FakeGitClient {
    /// A history of `hashes`, newest first, each with a single message line.
    pub fn with_commits(hashes: &[&str]) -> Self {
        let entries = hashes
            .iter()
            .enumerate()
            .map(|(i, hash)| LogEntry {
                hash: hash.to_string(),
                author: "Test Author".to_string(),
                date: format!("2024-01-{:02}T12:00:00+00:00", (i % 28) + 1),
                message: format!("Commit {i}"),
                parents: hashes.get(i + 1).map(|p| vec![p.to_string()]).unwrap_or_default(),
            })
            .collect();

        Self {
            entries,
            ..Default::default()
        }
    }

    pub fn failing(mut self, op: &'static str) -> Self {
        self.failing.insert(op);
        self
    }

    fn check(&self, op: &'static str) -> Result<(), GitError> {
        if self.failing.contains(op) {
            return Err(GitError::CommandFailed {
                args: vec![op.to_string()],
                stderr: format!("{op} exploded"),
            });
        }
        Ok(())
    }

    /// Holds a lookup slot across a yield so concurrent callers overlap.
    async fn occupy(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl GitClient for FakeGitClient {
    async fn log(&self, query: &LogQuery) -> Result<Vec<LogEntry>, GitError> {
        self.log_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());
        self.check("log")?;
        Ok(self.entries.clone())
    }

    async fn find_commit(&self, rev: &str) -> Result<Option<LogEntry>, GitError> {
        self.check("find_commit")?;
        Ok(self.entries.iter().find(|e| e.hash == rev).cloned())
    }

    async fn diff(&self, _hash: &str) -> Result<String, GitError> {
        self.check("diff")?;
        Ok(self.diff_text.clone())
    }

    async fn changed_files(&self, hash: &str) -> Result<Vec<String>, GitError> {
        self.occupy().await;
        self.check("changed_files")?;
        Ok(self.files.get(hash).cloned().unwrap_or_default())
    }

    async fn blame(&self, _path: &str) -> Result<String, GitError> {
        self.check("blame")?;
        Ok(self.blame_text.clone())
    }

    async fn tags(&self) -> Result<Vec<String>, GitError> {
        self.check("tags")?;
        Ok(self.tags.clone())
    }

    async fn branches(&self) -> Result<Vec<String>, GitError> {
        self.check("branches")?;
        Ok(self.branches.clone())
    }

    async fn branches_containing(&self, _hash: &str) -> Result<Vec<String>, GitError> {
        self.occupy().await;
        self.check("branches_containing")?;
        Ok(self.branches_containing.clone())
    }

    async fn tags_containing(&self, _hash: &str) -> Result<Vec<String>, GitError> {
        self.occupy().await;
        self.check("tags_containing")?;
        Ok(self.tags_containing.clone())
    }
}
