//! Commit history endpoints.
//!
//! - GET /api/commits?file=&since=&author=&page=&pageSize=
//!   One page of filtered history. Filters left out fall back to the ones
//!   given on the command line.
//!   Used by: commit list and graph views
//!
//! - GET /api/commit/{hash}
//!   A single commit with files, branches and tags.
//!   Used by: commit detail panel

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::error::Result;
use crate::git::SharedRepo;
use crate::models::{Commit, GitOptions, PaginatedCommits};

pub fn routes(repo: SharedRepo) -> Router {
    Router::new()
        .route("/api/commits", get(list_commits))
        .route("/api/commit/{hash}", get(get_commit))
        .with_state(repo)
}

async fn list_commits(
    State(repo): State<SharedRepo>,
    Query(options): Query<GitOptions>,
) -> Result<Json<PaginatedCommits>> {
    let response = repo.list_commits(&options).await?;
    Ok(Json(response))
}

async fn get_commit(
    State(repo): State<SharedRepo>,
    Path(hash): Path<String>,
) -> Result<Json<Commit>> {
    let commit = repo.get_commit(&hash).await?;
    Ok(Json(commit))
}
