//! Application error types and HTTP response mapping.
//!
//! - `GitError`: a single `git` invocation failed (spawn error, non-zero exit).
//! - `AppError`: what a history operation reports to its caller. Tool failures
//!   are wrapped with the operation that hit them so the message reads
//!   `Failed to get diff: ...`.
//!
//! Error mappings:
//! - `RepoNotFound`, `CommitNotFound` → 404
//! - `InvalidPath` → 400
//! - `Operation` → 500

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable not found in PATH")]
    GitNotInstalled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("git {} failed: {stderr}", .args.join(" "))]
    CommandFailed { args: Vec<String>, stderr: String },

    #[error("invalid revision: {0}")]
    InvalidRevision(String),
}

/// The top-level history operations, used to prefix tool failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListCommits,
    GetCommit,
    GetDiff,
    GetBlame,
    ListTags,
    ListBranches,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::ListCommits => "get commits",
            Operation::GetCommit => "get commit",
            Operation::GetDiff => "get diff",
            Operation::GetBlame => "get blame",
            Operation::ListTags => "get tags",
            Operation::ListBranches => "get branches",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Repository not found: {0}")]
    RepoNotFound(String),

    #[error("Commit not found: {0}")]
    CommitNotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Failed to {op}: {source}")]
    Operation { op: Operation, source: GitError },
}

impl AppError {
    /// Wraps a tool failure with the operation it interrupted.
    pub fn during(op: Operation) -> impl FnOnce(GitError) -> AppError {
        move |source| AppError::Operation { op, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::RepoNotFound(_) | AppError::CommitNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidPath(_) => StatusCode::BAD_REQUEST,
            AppError::Operation { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
