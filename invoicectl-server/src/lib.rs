//! invoicectl-server: PostgreSQL store and JSON HTTP surface
//!
//! The `db` module implements the core `Store` trait over sqlx; the `http`
//! module exposes the fetchers as axum routes.

pub mod db;
pub mod http;
pub mod state;

pub use db::{create_pool, create_pool_with_options, PgStore};
pub use http::{build_router, run_server, ApiError, ServerConfig, ServerError};
pub use state::AppState;
