//! Blame endpoint.
//!
//! GET /api/blame/{*path}
//!
//! Returns per-line attribution for a file at HEAD:
//! - Line number, commit hash, author, ISO-8601 date, line content
//!
//! Used by: blame viewer

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::error::Result;
use crate::git::SharedRepo;
use crate::models::BlameLine;

pub fn routes(repo: SharedRepo) -> Router {
    Router::new()
        .route("/api/blame/{*path}", get(get_blame))
        .with_state(repo)
}

async fn get_blame(
    State(repo): State<SharedRepo>,
    Path(path): Path<String>,
) -> Result<Json<Vec<BlameLine>>> {
    let lines = repo.get_blame(&path).await?;
    Ok(Json(lines))
}
