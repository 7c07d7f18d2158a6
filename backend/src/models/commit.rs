//! Commit history DTOs.
//!
//! - `Commit`: one log entry enriched with files, branches and tags
//! - `GitOptions`: filter and pagination parameters for a history request
//! - `PaginatedCommits`: one page of history plus the paging facts
//!
//! Field names follow the camelCase JSON the history UI consumes.

use serde::{Deserialize, Serialize};

use crate::git::LogQuery;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub hash: String,
    pub author: String,
    pub date: String,
    pub message: String,
    pub files: Vec<String>,
    pub parents: Vec<String>,
    pub branches: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitOptions {
    pub file: Option<String>,
    pub since: Option<String>,
    pub author: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    /// Older clients send `limit`; it only applies when `pageSize` is absent.
    pub limit: Option<usize>,
}

impl GitOptions {
    pub const DEFAULT_PAGE_SIZE: usize = 25;

    /// 1-based page number, never zero.
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
            .or(self.limit)
            .unwrap_or(Self::DEFAULT_PAGE_SIZE)
            .max(1)
    }

    /// Fills absent filters from `defaults`. Paging is never inherited.
    pub fn or_defaults(mut self, defaults: &GitOptions) -> Self {
        self.file = non_blank(self.file).or_else(|| defaults.file.clone());
        self.since = non_blank(self.since).or_else(|| defaults.since.clone());
        self.author = non_blank(self.author).or_else(|| defaults.author.clone());
        self
    }

    pub fn log_query(&self) -> LogQuery {
        LogQuery {
            file: self.file.clone(),
            since: self.since.clone(),
            author: self.author.clone(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedCommits {
    pub commits: Vec<Commit>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}
