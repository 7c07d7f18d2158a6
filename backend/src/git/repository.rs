use git2::Repository;
use std::path::Path;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::git::client::GitClient;
use crate::git::command_client::CommandGitClient;
use crate::models::GitOptions;

/// History queries against one repository.
///
/// Holds no mutable state: every request re-reads what git reports, so one
/// instance is shared by all handlers.
pub struct GitRepository {
    pub(crate) client: Arc<dyn GitClient>,
    pub path: String,
    /// Filters applied when a commit listing request leaves them out.
    pub defaults: GitOptions,
}

impl GitRepository {
    /// Opens the repository containing `path`, resolving sub-directories to the work tree root.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let repo = Repository::discover(&path).map_err(|_| AppError::RepoNotFound(path_str.clone()))?;

        let root = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        tracing::info!(root = %root.display(), bare = repo.is_bare(), "opened repository");

        Ok(Self::with_client(
            Arc::new(CommandGitClient::new(root.clone())),
            root.to_string_lossy().to_string(),
        ))
    }

    pub fn with_client(client: Arc<dyn GitClient>, path: String) -> Self {
        Self {
            client,
            path,
            defaults: GitOptions::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: GitOptions) -> Self {
        self.defaults = defaults;
        self
    }
}

pub type SharedRepo = Arc<GitRepository>;
