//! Branch and tag listings.
//!
//! - GET /api/branches: local and remote-tracking branch names
//! - GET /api/tags: tag names
//!
//! Used by: branch/tag filters and the graph legend

use axum::{extract::State, routing::get, Json, Router};

use crate::error::Result;
use crate::git::SharedRepo;

pub fn routes(repo: SharedRepo) -> Router {
    Router::new()
        .route("/api/branches", get(list_branches))
        .route("/api/tags", get(list_tags))
        .with_state(repo)
}

async fn list_branches(State(repo): State<SharedRepo>) -> Result<Json<Vec<String>>> {
    let branches = repo.list_branches().await?;
    Ok(Json(branches))
}

async fn list_tags(State(repo): State<SharedRepo>) -> Result<Json<Vec<String>>> {
    let tags = repo.list_tags().await?;
    Ok(Json(tags))
}
