use futures::stream::{self, StreamExt};
use tracing::debug;

use crate::error::{AppError, Operation, Result};
use crate::git::client::LogEntry;
use crate::git::pagination::paginate;
use crate::git::refs::or_empty;
use crate::git::repository::GitRepository;
use crate::models::{Commit, GitOptions, PaginatedCommits};

/// Commits enriched at once. Each enrichment runs three git processes.
pub(crate) const ENRICH_CONCURRENCY: usize = 8;

impl GitRepository {
    /// One page of history matching `options`, each commit enriched with its
    /// files, branches and tags.
    ///
    /// The filtered log is read once; the total and the page both come from it.
    pub async fn list_commits(&self, options: &GitOptions) -> Result<PaginatedCommits> {
        let options = options.clone().or_defaults(&self.defaults);
        let page = options.page();
        let page_size = options.page_size();

        let entries = self
            .client
            .log(&options.log_query())
            .await
            .map_err(AppError::during(Operation::ListCommits))?;

        let window = paginate(&entries, page, page_size);
        debug!(
            total = window.total,
            page,
            page_size,
            returned = window.items.len(),
            "paginated history"
        );

        // `buffered` yields results in input order, whatever order they finish in.
        let commits: Vec<Commit> = stream::iter(0..window.items.len())
            .map(|i| self.enrich(&window.items[i]))
            .buffered(ENRICH_CONCURRENCY)
            .collect()
            .await;

        Ok(PaginatedCommits {
            commits,
            total: window.total,
            page,
            page_size,
            total_pages: window.total_pages,
            has_next: window.has_next,
            has_previous: window.has_previous,
        })
    }

    pub async fn get_commit(&self, hash: &str) -> Result<Commit> {
        let entry = self
            .client
            .find_commit(hash)
            .await
            .map_err(AppError::during(Operation::GetCommit))?
            .ok_or_else(|| AppError::CommitNotFound(hash.to_string()))?;

        Ok(self.enrich(&entry).await)
    }

    /// Paths touched by `hash`; empty when git cannot diff it (e.g. a root commit).
    async fn files_touched(&self, hash: &str) -> Vec<String> {
        or_empty(self.client.changed_files(hash).await, hash, "files touched")
    }

    async fn enrich(&self, entry: &LogEntry) -> Commit {
        let (files, (branches, tags)) = tokio::join!(
            self.files_touched(&entry.hash),
            self.refs_containing(&entry.hash),
        );

        Commit {
            hash: entry.hash.clone(),
            author: entry.author.clone(),
            date: entry.date.clone(),
            message: entry.message.clone(),
            files,
            parents: entry.parents.clone(),
            branches,
            tags,
        }
    }
}
