//! `GitClient` backed by the `git` executable.
//!
//! Every call spawns one short-lived `git -C <root> ...` process and reads its
//! stdout. Log records are requested in a delimiter-separated format so commit
//! messages can span several lines.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, trace, warn};

use crate::error::GitError;
use crate::git::client::{GitClient, LogEntry, LogQuery};

const FIELD_SEP: char = '\x1f';
const RECORD_SEP: char = '\x1e';
const LOG_FORMAT: &str = "--format=%H%x1f%an%x1f%aI%x1f%P%x1f%B%x1e";
const REF_FORMAT: &str = "--format=%(refname:short)";

pub struct CommandGitClient {
    root: PathBuf,
}

impl CommandGitClient {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn run(&self, args: &[&str]) -> Result<String, GitError> {
        run_git(&self.root, args).await
    }

    /// Full hash of the commit `rev` names, or `None` when git cannot resolve it.
    async fn resolve_commit(&self, rev: &str) -> Result<Option<String>, GitError> {
        let peeled = format!("{rev}^{{commit}}");
        match self.run(&["rev-parse", "--verify", "--quiet", &peeled]).await {
            Ok(oid) => Ok(Some(oid.trim().to_string())),
            Err(GitError::CommandFailed { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// A revision becomes the range `<since>..HEAD`; anything else is handed
    /// to git as a date.
    async fn since_arg(&self, since: &str) -> Result<String, GitError> {
        let since = revision(since)?;
        Ok(match self.resolve_commit(since).await? {
            Some(_) => format!("{since}..HEAD"),
            None => format!("--since={since}"),
        })
    }
}

#[async_trait]
impl GitClient for CommandGitClient {
    async fn log(&self, query: &LogQuery) -> Result<Vec<LogEntry>, GitError> {
        let mut args: Vec<String> = vec!["log".into(), LOG_FORMAT.into()];
        if let Some(author) = &query.author {
            args.push(format!("--author={author}"));
        }
        if let Some(since) = &query.since {
            args.push(self.since_arg(since).await?);
        }
        if let Some(file) = &query.file {
            args.push("--".into());
            args.push(file.clone());
        }

        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let output = self.run(&args).await?;
        let entries = parse_log(&output);

        debug!(
            root = %self.root.display(),
            count = entries.len(),
            ?query,
            "loaded commit log"
        );

        Ok(entries)
    }

    async fn find_commit(&self, rev: &str) -> Result<Option<LogEntry>, GitError> {
        let Ok(rev) = revision(rev) else {
            return Ok(None);
        };

        let Some(resolved) = self.resolve_commit(rev).await? else {
            return Ok(None);
        };

        let output = self.run(&["log", "-1", LOG_FORMAT, &resolved]).await?;
        Ok(parse_log(&output).into_iter().next())
    }

    async fn diff(&self, hash: &str) -> Result<String, GitError> {
        let hash = revision(hash)?;
        let parent = format!("{hash}^");
        self.run(&["diff", "--no-color", &parent, hash]).await
    }

    async fn changed_files(&self, hash: &str) -> Result<Vec<String>, GitError> {
        let hash = revision(hash)?;
        let parent = format!("{hash}^");
        let output = self.run(&["diff", "--name-only", &parent, hash]).await?;
        Ok(non_empty_lines(&output))
    }

    async fn blame(&self, path: &str) -> Result<String, GitError> {
        self.run(&["blame", "--line-porcelain", "--", path]).await
    }

    async fn tags(&self) -> Result<Vec<String>, GitError> {
        let output = self.run(&["tag", "--list"]).await?;
        Ok(non_empty_lines(&output))
    }

    async fn branches(&self) -> Result<Vec<String>, GitError> {
        let output = self.run(&["branch", "--all", REF_FORMAT]).await?;
        Ok(branch_names(&output))
    }

    async fn branches_containing(&self, hash: &str) -> Result<Vec<String>, GitError> {
        let hash = revision(hash)?;
        let output = self
            .run(&["branch", "--all", "--contains", hash, REF_FORMAT])
            .await?;
        Ok(branch_names(&output))
    }

    async fn tags_containing(&self, hash: &str) -> Result<Vec<String>, GitError> {
        let hash = revision(hash)?;
        let output = self.run(&["tag", "--contains", hash]).await?;
        Ok(non_empty_lines(&output))
    }
}

/// Runs a git command in `root` and returns its stdout on success.
async fn run_git(root: &Path, args: &[&str]) -> Result<String, GitError> {
    let mut cmd = Command::new("git");
    cmd.arg("-C").arg(root).args(args);

    trace!(
        cmd = %format!("git -C {} {}", root.display(), args.join(" ")),
        "running git command"
    );

    let output = cmd.output().await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            warn!("git not found in PATH");
            GitError::GitNotInstalled
        } else {
            GitError::Io(e)
        }
    })?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        Err(GitError::CommandFailed {
            args: args.iter().map(|s| s.to_string()).collect(),
            stderr,
        })
    }
}

/// Rejects revisions git would read as an option.
fn revision(rev: &str) -> Result<&str, GitError> {
    if rev.is_empty() || rev.starts_with('-') {
        return Err(GitError::InvalidRevision(rev.to_string()));
    }
    Ok(rev)
}

/// Parses `git log` output produced with `LOG_FORMAT`.
fn parse_log(output: &str) -> Vec<LogEntry> {
    output
        .split(RECORD_SEP)
        .filter_map(|record| {
            let record = record.trim_start_matches(['\n', '\r']);
            if record.is_empty() {
                return None;
            }

            let mut fields = record.splitn(5, FIELD_SEP);
            let hash = fields.next()?.trim();
            if hash.is_empty() {
                return None;
            }
            let author = fields.next().unwrap_or("").to_string();
            let date = fields.next().unwrap_or("").to_string();
            let parents = fields
                .next()
                .unwrap_or("")
                .split_whitespace()
                .map(str::to_string)
                .collect();
            let message = fields.next().unwrap_or("").trim_end().to_string();

            Some(LogEntry {
                hash: hash.to_string(),
                author,
                date,
                message,
                parents,
            })
        })
        .collect()
}

fn non_empty_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Branch names from `git branch --format`, minus the detached-HEAD pseudo entry.
fn branch_names(output: &str) -> Vec<String> {
    non_empty_lines(output)
        .into_iter()
        .filter(|name| !name.starts_with('('))
        .collect()
}
