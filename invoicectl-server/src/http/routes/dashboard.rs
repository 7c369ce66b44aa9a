//! Dashboard overview routes

use axum::extract::{Query, State};
use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use invoicectl_core::models::{CardData, DashboardData, LatestInvoice, Revenue};
use invoicectl_core::DashboardStrategy;

use crate::http::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    #[serde(default)]
    pub strategy: DashboardStrategy,
}

/// Revenue chart payload
#[derive(Debug, Serialize)]
pub struct RevenueChart {
    pub revenue: Vec<Revenue>,
    /// Top of the y axis, rounded up to the next thousand
    pub y_axis_top: i64,
}

/// GET /api/dashboard
async fn overview(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> Result<Json<DashboardData>, ApiError> {
    let data = state.fetcher().fetch_dashboard(params.strategy).await?;
    Ok(Json(data))
}

/// GET /api/dashboard/revenue
///
/// Chart rows and axis are computed from separate reads that share one
/// query through the request scope.
async fn revenue(State(state): State<AppState>) -> Result<Json<RevenueChart>, ApiError> {
    let scope = state.scope();

    let rows = scope.revenue().await?;
    let y_axis_top = y_axis_top(&scope.revenue().await?);

    Ok(Json(RevenueChart {
        revenue: rows.to_vec(),
        y_axis_top,
    }))
}

/// GET /api/dashboard/latest-invoices
async fn latest_invoices(
    State(state): State<AppState>,
) -> Result<Json<Vec<LatestInvoice>>, ApiError> {
    Ok(Json(state.fetcher().fetch_latest_invoices().await?))
}

/// GET /api/dashboard/cards
async fn cards(State(state): State<AppState>) -> Result<Json<CardData>, ApiError> {
    Ok(Json(state.fetcher().fetch_card_data().await?))
}

fn y_axis_top(revenue: &[Revenue]) -> i64 {
    let highest = revenue.iter().map(|r| r.revenue).max().unwrap_or(0);
    (highest + 999).div_euclid(1000) * 1000
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/dashboard", get(overview))
        .route("/api/dashboard/revenue", get(revenue))
        .route("/api/dashboard/latest-invoices", get(latest_invoices))
        .route("/api/dashboard/cards", get(cards))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(revenue: i64) -> Revenue {
        Revenue {
            month: "Jan".into(),
            revenue,
        }
    }

    #[test]
    fn y_axis_rounds_up_to_thousand() {
        assert_eq!(y_axis_top(&[month(4800), month(2000)]), 5000);
        assert_eq!(y_axis_top(&[month(3000)]), 3000);
        assert_eq!(y_axis_top(&[]), 0);
    }
}
