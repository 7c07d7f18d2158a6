use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::error::Result;
use crate::git::SharedRepo;
use crate::models::DiffFile;

pub fn routes(repo: SharedRepo) -> Router {
    Router::new()
        .route("/api/diff/{hash}", get(get_diff))
        .with_state(repo)
}

async fn get_diff(
    State(repo): State<SharedRepo>,
    Path(hash): Path<String>,
) -> Result<Json<Vec<DiffFile>>> {
    let files = repo.get_diff(&hash).await?;
    Ok(Json(files))
}
