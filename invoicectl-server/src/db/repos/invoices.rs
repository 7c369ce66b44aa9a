//! Invoice repository
//!
//! Listings JOIN customers; search is a single ILIKE pattern bound once and
//! matched against name, email, amount, date and status.

use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};

use invoicectl_core::models::{
    CardTotals, InvoiceRecord, InvoiceTableRow, LatestInvoiceRow, StatusTotals,
};
use invoicectl_core::search::ilike_pattern;
use invoicectl_core::StoreError;

use super::db_err;

/// Shared WHERE clause for invoice search; `$1` is the ILIKE pattern.
const SEARCH_PREDICATE: &str = r#"
    customers.name ILIKE $1 OR
    customers.email ILIKE $1 OR
    invoices.amount::text ILIKE $1 OR
    invoices.date::text ILIKE $1 OR
    invoices.status ILIKE $1
"#;

#[derive(Debug, FromRow)]
struct LatestRow {
    id: String,
    name: String,
    email: String,
    image_url: String,
    amount: i64,
}

#[derive(Debug, FromRow)]
struct TableRow {
    id: String,
    customer_id: String,
    name: String,
    email: String,
    image_url: String,
    date: NaiveDate,
    amount: i64,
    status: String,
}

#[derive(Debug, FromRow)]
struct RecordRow {
    id: String,
    customer_id: String,
    amount: i64,
    status: String,
}

#[derive(Debug, FromRow)]
struct TotalsRow {
    paid: i64,
    pending: i64,
}

#[derive(Debug, FromRow)]
struct CardRow {
    invoice_count: i64,
    customer_count: i64,
    paid: i64,
    pending: i64,
}

/// Invoice repository
pub struct InvoiceRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> InvoiceRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Newest invoices with their customer.
    pub async fn latest(&self, limit: u32) -> Result<Vec<LatestInvoiceRow>, StoreError> {
        let rows: Vec<LatestRow> = sqlx::query_as(
            r#"
            SELECT
                invoices.id::text AS id,
                invoices.amount::bigint AS amount,
                customers.name,
                customers.email,
                customers.image_url
            FROM invoices
            JOIN customers ON invoices.customer_id = customers.id
            ORDER BY invoices.date DESC
            LIMIT $1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|r| LatestInvoiceRow {
                id: r.id,
                name: r.name,
                email: r.email,
                image_url: r.image_url,
                amount: r.amount,
            })
            .collect())
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM invoices")
            .fetch_one(self.pool)
            .await
            .map_err(db_err)?;
        Ok(count)
    }

    /// Paid and pending sums.
    pub async fn status_totals(&self) -> Result<StatusTotals, StoreError> {
        let row: TotalsRow = sqlx::query_as(
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN status = 'paid' THEN amount ELSE 0 END), 0)::bigint AS paid,
                COALESCE(SUM(CASE WHEN status = 'pending' THEN amount ELSE 0 END), 0)::bigint AS pending
            FROM invoices
            "#,
        )
        .fetch_one(self.pool)
        .await
        .map_err(db_err)?;

        Ok(StatusTotals {
            paid: row.paid,
            pending: row.pending,
        })
    }

    /// Invoice count, customer count and status sums as one statement.
    pub async fn card_totals(&self) -> Result<CardTotals, StoreError> {
        let row: CardRow = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM invoices) AS invoice_count,
                (SELECT COUNT(*) FROM customers) AS customer_count,
                (SELECT COALESCE(SUM(CASE WHEN status = 'paid' THEN amount ELSE 0 END), 0)::bigint
                   FROM invoices) AS paid,
                (SELECT COALESCE(SUM(CASE WHEN status = 'pending' THEN amount ELSE 0 END), 0)::bigint
                   FROM invoices) AS pending
            "#,
        )
        .fetch_one(self.pool)
        .await
        .map_err(db_err)?;

        Ok(CardTotals {
            invoice_count: row.invoice_count,
            customer_count: row.customer_count,
            totals: StatusTotals {
                paid: row.paid,
                pending: row.pending,
            },
        })
    }

    /// One page of invoices matching `query`.
    pub async fn search(
        &self,
        query: &str,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<InvoiceTableRow>, StoreError> {
        let sql = format!(
            r#"
            SELECT
                invoices.id::text AS id,
                invoices.customer_id::text AS customer_id,
                invoices.amount::bigint AS amount,
                invoices.date,
                invoices.status,
                customers.name,
                customers.email,
                customers.image_url
            FROM invoices
            JOIN customers ON invoices.customer_id = customers.id
            WHERE {SEARCH_PREDICATE}
            ORDER BY invoices.date DESC
            LIMIT $2 OFFSET $3
            "#
        );

        let rows: Vec<TableRow> = sqlx::query_as(&sql)
            .bind(ilike_pattern(query))
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(self.pool)
            .await
            .map_err(db_err)?;

        rows.into_iter()
            .map(|r| {
                Ok(InvoiceTableRow {
                    id: r.id,
                    customer_id: r.customer_id,
                    name: r.name,
                    email: r.email,
                    image_url: r.image_url,
                    date: r.date,
                    amount: r.amount,
                    status: r.status.parse()?,
                })
            })
            .collect()
    }

    /// Number of invoices matching `query`.
    pub async fn count_matching(&self, query: &str) -> Result<i64, StoreError> {
        let sql = format!(
            r#"
            SELECT COUNT(*)
            FROM invoices
            JOIN customers ON invoices.customer_id = customers.id
            WHERE {SEARCH_PREDICATE}
            "#
        );

        let (count,): (i64,) = sqlx::query_as(&sql)
            .bind(ilike_pattern(query))
            .fetch_one(self.pool)
            .await
            .map_err(db_err)?;
        Ok(count)
    }

    /// Single invoice; a malformed id simply matches nothing.
    pub async fn get(&self, id: &str) -> Result<Option<InvoiceRecord>, StoreError> {
        let row: Option<RecordRow> = sqlx::query_as(
            r#"
            SELECT
                invoices.id::text AS id,
                invoices.customer_id::text AS customer_id,
                invoices.amount::bigint AS amount,
                invoices.status
            FROM invoices
            WHERE invoices.id::text = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(db_err)?;

        row.map(|r| {
            Ok(InvoiceRecord {
                id: r.id,
                customer_id: r.customer_id,
                amount: r.amount,
                status: r.status.parse()?,
            })
        })
        .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations, seed};

    // Integration tests - run with DATABASE_URL set
    // cargo test -p invoicectl-server -- --ignored

    async fn seeded_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        seed::run(&pool).await.expect("seed failed");
        pool
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn search_matches_status_case_insensitively() {
        let pool = seeded_pool().await;
        let rows = InvoiceRepo::new(&pool).search("PAID", 6, 0).await.unwrap();

        assert!(!rows.is_empty());
        assert!(rows
            .iter()
            .all(|r| r.status == invoicectl_core::models::InvoiceStatus::Paid));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn malformed_id_is_none() {
        let pool = seeded_pool().await;
        let invoice = InvoiceRepo::new(&pool).get("abc123").await.unwrap();
        assert!(invoice.is_none());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn card_totals_agree_with_separate_queries() {
        let pool = seeded_pool().await;
        let repo = InvoiceRepo::new(&pool);

        let card = repo.card_totals().await.unwrap();
        assert_eq!(card.invoice_count, repo.count().await.unwrap());
        assert_eq!(card.totals, repo.status_totals().await.unwrap());
    }
}
