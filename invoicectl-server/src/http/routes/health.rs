//! Health check endpoint

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub demo_delays: bool,
    pub cached_page_counts: usize,
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let fetcher = state.fetcher();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        demo_delays: fetcher.delays().enabled,
        cached_page_counts: fetcher.cached_page_counts(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use invoicectl_core::{DemoDelays, Fetcher, MemoryStore};

    #[tokio::test]
    async fn health_returns_ok() {
        let fetcher = Fetcher::new(Arc::new(MemoryStore::new()), DemoDelays::none());
        let Json(body) = health(State(AppState::new(fetcher))).await;

        assert_eq!(body.status, "ok");
        assert!(!body.demo_delays);
        assert_eq!(body.cached_page_counts, 0);
    }
}
