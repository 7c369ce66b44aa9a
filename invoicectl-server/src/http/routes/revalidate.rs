//! Cache invalidation signal

use axum::extract::{Query, State};
use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RevalidateParams {
    pub tag: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RevalidateResponse {
    pub tag: String,
    pub cleared: usize,
}

/// POST /api/revalidate?tag=
///
/// Sent after invoice writes; drops every cached value under `tag`.
async fn revalidate(
    State(state): State<AppState>,
    Query(params): Query<RevalidateParams>,
) -> Result<Json<RevalidateResponse>, ApiError> {
    let tag = params
        .tag
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest {
            message: "missing `tag` parameter".into(),
        })?;

    let cleared = state.fetcher().revalidate_tag(&tag);
    Ok(Json(RevalidateResponse { tag, cleared }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/revalidate", post(revalidate))
}
