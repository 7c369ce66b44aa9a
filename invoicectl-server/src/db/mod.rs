//! Database layer - pool, schema, seed data and the `Store` adapter
//!
//! - One pool (default 5 connections) shared by every request
//! - List queries JOIN customers instead of issuing N+1 lookups
//! - Seeding relies on primary keys and `ON CONFLICT DO NOTHING`

pub mod migrations;
pub mod pool;
pub mod repos;
pub mod seed;
pub mod store;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
pub use store::PgStore;

pub use sqlx::PgPool;
