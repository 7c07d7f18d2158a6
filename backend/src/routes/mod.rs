//! API route handlers - maps HTTP endpoints to history operations.
//!
//! Each submodule defines routes for a feature area:
//! - `commits`: Paginated history and single-commit lookup
//! - `diff`: Per-file changes of a commit
//! - `blame`: Per-line author attribution
//! - `refs`: Branch and tag listings

pub mod blame;
pub mod commits;
pub mod diff;
pub mod refs;

use axum::Router;

use crate::git::SharedRepo;

pub fn create_router(repo: SharedRepo) -> Router {
    Router::new()
        .merge(commits::routes(repo.clone()))
        .merge(diff::routes(repo.clone()))
        .merge(blame::routes(repo.clone()))
        .merge(refs::routes(repo))
}
