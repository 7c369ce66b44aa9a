//! Revenue repository

use sqlx::{FromRow, PgPool};

use invoicectl_core::models::Revenue;
use invoicectl_core::StoreError;

use super::db_err;

#[derive(Debug, FromRow)]
struct RevenueRow {
    month: String,
    revenue: i64,
}

pub struct RevenueRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> RevenueRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every month in table order.
    pub async fn all(&self) -> Result<Vec<Revenue>, StoreError> {
        let rows: Vec<RevenueRow> =
            sqlx::query_as("SELECT month, revenue::bigint AS revenue FROM revenue ORDER BY position")
                .fetch_all(self.pool)
                .await
                .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|r| Revenue {
                month: r.month,
                revenue: r.revenue,
            })
            .collect())
    }
}
