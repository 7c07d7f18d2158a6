//! Branch and tag queries.
//!
//! - `list_tags` / `list_branches`: every ref of that kind in the repository
//! - `refs_containing`: branches and tags that contain one commit, used to
//!   decorate commits in history listings

use tracing::{debug, warn};

use crate::error::{AppError, GitError, Operation, Result};
use crate::git::repository::GitRepository;

impl GitRepository {
    pub async fn list_tags(&self) -> Result<Vec<String>> {
        self.client
            .tags()
            .await
            .map_err(AppError::during(Operation::ListTags))
    }

    pub async fn list_branches(&self) -> Result<Vec<String>> {
        self.client
            .branches()
            .await
            .map_err(AppError::during(Operation::ListBranches))
    }

    /// Branches and tags containing `hash`, looked up concurrently.
    ///
    /// Never fails: a lookup that errors contributes an empty list and leaves
    /// the other one intact.
    pub async fn refs_containing(&self, hash: &str) -> (Vec<String>, Vec<String>) {
        let (branches, tags) = tokio::join!(
            self.client.branches_containing(hash),
            self.client.tags_containing(hash),
        );

        (
            or_empty(branches, hash, "branches containing commit"),
            or_empty(tags, hash, "tags containing commit"),
        )
    }
}

/// Degrades an auxiliary lookup failure to an empty list.
///
/// A lookup git rejects (a root commit has no parent to diff) is logged at
/// `debug`; failing to run git at all is logged at `warn`.
pub(crate) fn or_empty(
    result: std::result::Result<Vec<String>, GitError>,
    hash: &str,
    what: &str,
) -> Vec<String> {
    result.unwrap_or_else(|e| {
        match e {
            GitError::CommandFailed { .. } | GitError::InvalidRevision(_) => {
                debug!(hash, error = %e, "{what} unavailable")
            }
            _ => warn!(hash, error = %e, "{what} lookup could not run"),
        }
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::git::testing::FakeGitClient;

    fn repo(client: FakeGitClient) -> GitRepository {
        GitRepository::with_client(Arc::new(client), "/repo".to_string())
    }

    #[tokio::test]
    async fn both_lookups_succeed() {
        let repo = repo(FakeGitClient {
            branches_containing: vec!["main".into(), "develop".into()],
            tags_containing: vec!["v1.0.0".into()],
            ..Default::default()
        });

        let (branches, tags) = repo.refs_containing("abc123").await;
        assert_eq!(branches, vec!["main", "develop"]);
        assert_eq!(tags, vec!["v1.0.0"]);
    }

    #[tokio::test]
    async fn failed_tag_lookup_keeps_branches() {
        let repo = repo(
            FakeGitClient {
                branches_containing: vec!["main".into()],
                tags_containing: vec!["v1.0.0".into()],
                ..Default::default()
            }
            .failing("tags_containing"),
        );

        let (branches, tags) = repo.refs_containing("abc123").await;
        assert_eq!(branches, vec!["main"]);
        assert!(tags.is_empty());
    }

    #[tokio::test]
    async fn failed_branch_lookup_keeps_tags() {
        let repo = repo(
            FakeGitClient {
                branches_containing: vec!["main".into()],
                tags_containing: vec!["v1.0.0".into()],
                ..Default::default()
            }
            .failing("branches_containing"),
        );

        let (branches, tags) = repo.refs_containing("abc123").await;
        assert!(branches.is_empty());
        assert_eq!(tags, vec!["v1.0.0"]);
    }

    #[tokio::test]
    async fn list_tags_and_branches_pass_through() {
        let repo = repo(FakeGitClient {
            tags: vec!["v1.0.0".into(), "v1.1.0".into(), "v2.0.0".into()],
            branches: vec!["main".into(), "develop".into(), "feature/test".into()],
            ..Default::default()
        });

        assert_eq!(repo.list_tags().await.unwrap(), vec!["v1.0.0", "v1.1.0", "v2.0.0"]);
        assert_eq!(
            repo.list_branches().await.unwrap(),
            vec!["main", "develop", "feature/test"]
        );
    }

    #[tokio::test]
    async fn empty_ref_lists_are_not_errors() {
        let repo = repo(FakeGitClient::default());
        assert!(repo.list_tags().await.unwrap().is_empty());
        assert!(repo.list_branches().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ref_listing_failures_name_the_operation() {
        let repo = repo(FakeGitClient::default().failing("tags").failing("branches"));

        let err = repo.list_tags().await.unwrap_err();
        assert!(err.to_string().starts_with("Failed to get tags: "));
        assert!(err.to_string().contains("tags exploded"));

        let err = repo.list_branches().await.unwrap_err();
        assert!(err.to_string().starts_with("Failed to get branches: "));
    }
}
