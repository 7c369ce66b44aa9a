//! Schema for the invoice dashboard
//!
//! Idempotent: every statement is `IF NOT EXISTS`, so `migrate` can run on
//! every start.

use sqlx::PgPool;

/// Create extensions, tables and indexes.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running invoice dashboard migrations...");

    sqlx::query(r#"CREATE EXTENSION IF NOT EXISTS "pgcrypto""#)
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS customers (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL,
            image_url VARCHAR(255) NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Amounts are integer cents
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS invoices (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            customer_id UUID NOT NULL REFERENCES customers(id) ON DELETE CASCADE,
            amount BIGINT NOT NULL,
            status VARCHAR(255) NOT NULL CHECK (status IN ('paid', 'pending')),
            date DATE NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS revenue (
            month VARCHAR(4) NOT NULL UNIQUE,
            revenue BIGINT NOT NULL,
            position INT NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_invoices_date ON invoices(date DESC)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_invoices_customer ON invoices(customer_id)")
        .execute(pool)
        .await?;

    tracing::info!("Migrations complete");
    Ok(())
}
