//! PostgreSQL connection pool
//!
//! Every query the fetchers issue goes through one shared `PgPool`; the
//! pool is the only place connections are opened.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Default pool size, matching `[database] max_connections`.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Create a pool with the default size.
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/invoicectl").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a pool capped at `max_connections`.
///
/// The dashboard fan-out holds up to three connections at once, so values
/// below 3 serialize it.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(max_connections, "opening database pool");
    PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect(database_url)
        .await
}
