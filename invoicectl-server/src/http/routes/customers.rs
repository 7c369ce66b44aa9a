//! Customer routes

use axum::extract::{Query, State};
use axum::{routing::get, Json, Router};

use invoicectl_core::models::{CustomerField, CustomerTable};
use invoicectl_core::SearchParams;

use crate::http::error::ApiError;
use crate::state::AppState;

/// GET /api/customers
async fn list(State(state): State<AppState>) -> Result<Json<Vec<CustomerField>>, ApiError> {
    Ok(Json(state.fetcher().fetch_customers().await?))
}

/// GET /api/customers/table?query=
async fn table(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<CustomerTable>>, ApiError> {
    Ok(Json(
        state
            .fetcher()
            .fetch_filtered_customers(&params.query)
            .await?,
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/customers", get(list))
        .route("/api/customers/table", get(table))
}
