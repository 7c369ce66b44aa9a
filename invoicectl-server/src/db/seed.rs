//! Load the placeholder dataset into PostgreSQL

use sqlx::PgPool;

use invoicectl_core::placeholder;

/// Rows actually inserted by one seed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub customers: u64,
    pub invoices: u64,
    pub revenue: u64,
}

impl SeedReport {
    pub fn total(&self) -> u64 {
        self.customers + self.invoices + self.revenue
    }
}

/// Insert customers, invoices and revenue in one transaction.
///
/// Existing rows are left alone, so a second run reports zero inserts.
pub async fn run(pool: &PgPool) -> Result<SeedReport, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let mut report = SeedReport::default();

    for customer in placeholder::customers() {
        report.customers += sqlx::query(
            r#"
            INSERT INTO customers (id, name, email, image_url)
            VALUES ($1::uuid, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.image_url)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    for invoice in placeholder::invoices() {
        report.invoices += sqlx::query(
            r#"
            INSERT INTO invoices (id, customer_id, amount, status, date)
            VALUES ($1::uuid, $2::uuid, $3, $4, $5)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&invoice.id)
        .bind(&invoice.customer_id)
        .bind(invoice.amount)
        .bind(invoice.status.as_str())
        .bind(invoice.date)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    for (position, month) in placeholder::revenue().into_iter().enumerate() {
        report.revenue += sqlx::query(
            r#"
            INSERT INTO revenue (month, revenue, position)
            VALUES ($1, $2, $3)
            ON CONFLICT (month) DO NOTHING
            "#,
        )
        .bind(&month.month)
        .bind(month.revenue)
        .bind(position as i32)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    tx.commit().await?;

    tracing::info!(
        customers = report.customers,
        invoices = report.invoices,
        revenue = report.revenue,
        "seed complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations};

    #[test]
    fn report_total_sums_tables() {
        let report = SeedReport {
            customers: 6,
            invoices: 13,
            revenue: 12,
        };
        assert_eq!(report.total(), 31);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn second_seed_inserts_nothing() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");

        run(&pool).await.expect("first seed failed");
        let again = run(&pool).await.expect("second seed failed");
        assert_eq!(again.total(), 0);
    }
}
