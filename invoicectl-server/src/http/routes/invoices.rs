//! Invoice routes

use axum::extract::{Path, Query, State};
use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use invoicectl_core::models::{InvoiceForm, InvoiceTableRow};
use invoicectl_core::SearchParams;

use crate::http::error::ApiError;
use crate::state::AppState;

/// One page of the invoices table plus pagination
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicesPage {
    pub invoices: Vec<InvoiceTableRow>,
    pub total_pages: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagesResponse {
    pub total_pages: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct PagesParams {
    #[serde(default)]
    pub query: String,
    /// Bypass the cross-request cache
    #[serde(default)]
    pub fresh: bool,
}

/// GET /api/invoices?query=&page=
///
/// Rows and page count are fetched concurrently; the count comes from the
/// tag cache.
async fn list(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<InvoicesPage>, ApiError> {
    let fetcher = state.fetcher();
    let (invoices, total_pages) = tokio::try_join!(
        fetcher.fetch_filtered_invoices(&params.query, params.current_page()),
        fetcher.fetch_invoices_pages_cached(&params.query),
    )?;

    Ok(Json(InvoicesPage {
        invoices,
        total_pages,
    }))
}

/// GET /api/invoices/pages?query=&fresh=
async fn pages(
    State(state): State<AppState>,
    Query(params): Query<PagesParams>,
) -> Result<Json<PagesResponse>, ApiError> {
    let fetcher = state.fetcher();
    let total_pages = if params.fresh {
        fetcher.fetch_invoices_pages(&params.query).await?
    } else {
        fetcher.fetch_invoices_pages_cached(&params.query).await?
    };

    Ok(Json(PagesResponse { total_pages }))
}

/// GET /api/invoices/{id}
async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InvoiceForm>, ApiError> {
    state
        .fetcher()
        .fetch_invoice_by_id(&id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound {
            resource: "invoice",
            id,
        })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/invoices", get(list))
        .route("/api/invoices/pages", get(pages))
        .route("/api/invoices/{id}", get(get_invoice))
}
