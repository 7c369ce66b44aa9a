//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - One parameterized query per call site, JOINs instead of N+1
//! - UUID ids are read back as text; amounts as BIGINT cents
//! - Sums are COALESCEd so empty tables read as zero

pub mod customers;
pub mod invoices;
pub mod revenue;

pub use customers::CustomerRepo;
pub use invoices::InvoiceRepo;
pub use revenue::RevenueRepo;

use invoicectl_core::StoreError;

/// Convert a driver error into the store's error type.
pub(crate) fn db_err(e: sqlx::Error) -> StoreError {
    StoreError::backend(e)
}
