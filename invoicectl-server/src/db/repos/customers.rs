//! Customer repository

use sqlx::{FromRow, PgPool};

use invoicectl_core::models::{CustomerField, CustomerTableRow};
use invoicectl_core::search::ilike_pattern;
use invoicectl_core::StoreError;

use super::db_err;

#[derive(Debug, FromRow)]
struct FieldRow {
    id: String,
    name: String,
}

#[derive(Debug, FromRow)]
struct TableRow {
    id: String,
    name: String,
    email: String,
    image_url: String,
    total_invoices: i64,
    total_pending: i64,
    total_paid: i64,
}

/// Customer repository
pub struct CustomerRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customers")
            .fetch_one(self.pool)
            .await
            .map_err(db_err)?;
        Ok(count)
    }

    /// Id and name of every customer, by name.
    pub async fn list(&self) -> Result<Vec<CustomerField>, StoreError> {
        let rows: Vec<FieldRow> = sqlx::query_as(
            r#"
            SELECT id::text AS id, name
            FROM customers
            ORDER BY name ASC
            "#,
        )
        .fetch_all(self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|r| CustomerField {
                id: r.id,
                name: r.name,
            })
            .collect())
    }

    /// Customers matching `query` by name or email, with invoice aggregates.
    ///
    /// LEFT JOIN keeps customers without invoices; their sums read as zero.
    pub async fn search(&self, query: &str) -> Result<Vec<CustomerTableRow>, StoreError> {
        let rows: Vec<TableRow> = sqlx::query_as(
            r#"
            SELECT
                customers.id::text AS id,
                customers.name,
                customers.email,
                customers.image_url,
                COUNT(invoices.id) AS total_invoices,
                COALESCE(SUM(CASE WHEN invoices.status = 'pending' THEN invoices.amount ELSE 0 END), 0)::bigint
                    AS total_pending,
                COALESCE(SUM(CASE WHEN invoices.status = 'paid' THEN invoices.amount ELSE 0 END), 0)::bigint
                    AS total_paid
            FROM customers
            LEFT JOIN invoices ON customers.id = invoices.customer_id
            WHERE
                customers.name ILIKE $1 OR
                customers.email ILIKE $1
            GROUP BY customers.id, customers.name, customers.email, customers.image_url
            ORDER BY customers.name ASC
            "#,
        )
        .bind(ilike_pattern(query))
        .fetch_all(self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|r| CustomerTableRow {
                id: r.id,
                name: r.name,
                email: r.email,
                image_url: r.image_url,
                total_invoices: r.total_invoices,
                total_pending: r.total_pending,
                total_paid: r.total_paid,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations, seed};

    async fn seeded_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        seed::run(&pool).await.expect("seed failed");
        pool
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn list_is_sorted_by_name() {
        let pool = seeded_pool().await;
        let customers = CustomerRepo::new(&pool).list().await.unwrap();

        let names: Vec<_> = customers.iter().map(|c| c.name.clone()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn empty_query_returns_every_customer() {
        let pool = seeded_pool().await;
        let repo = CustomerRepo::new(&pool);

        let rows = repo.search("").await.unwrap();
        assert_eq!(rows.len() as i64, repo.count().await.unwrap());
    }
}
