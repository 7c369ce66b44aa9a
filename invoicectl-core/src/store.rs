//! Query-execution contract consumed by the fetchers
//!
//! One method per call-site query shape. Implementations return raw rows
//! (amounts in cents) in the order the call site expects.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{
    CardTotals, CustomerField, CustomerTableRow, InvoiceRecord, InvoiceTableRow,
    LatestInvoiceRow, Revenue, StatusTotals,
};

/// Relational store backing the dashboard
#[async_trait]
pub trait Store: Send + Sync {
    /// All revenue rows.
    async fn revenue(&self) -> Result<Vec<Revenue>, StoreError>;

    /// Most recent invoices joined with their customer, newest first.
    async fn latest_invoices(&self, limit: u32) -> Result<Vec<LatestInvoiceRow>, StoreError>;

    /// Number of invoices.
    async fn invoice_count(&self) -> Result<i64, StoreError>;

    /// Number of customers.
    async fn customer_count(&self) -> Result<i64, StoreError>;

    /// Sum of paid and pending invoice amounts.
    async fn status_totals(&self) -> Result<StatusTotals, StoreError>;

    /// Counts and sums in a single round trip.
    async fn card_totals(&self) -> Result<CardTotals, StoreError>;

    /// Invoices matching `query` (see [`crate::search`]), newest first.
    async fn filtered_invoices(
        &self,
        query: &str,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<InvoiceTableRow>, StoreError>;

    /// Number of invoices matching `query`.
    async fn count_filtered_invoices(&self, query: &str) -> Result<i64, StoreError>;

    /// One invoice, if it exists.
    async fn invoice_by_id(&self, id: &str) -> Result<Option<InvoiceRecord>, StoreError>;

    /// All customers, ordered by name.
    async fn customers(&self) -> Result<Vec<CustomerField>, StoreError>;

    /// Customers whose name or email matches `query`, with invoice totals.
    async fn filtered_customers(&self, query: &str) -> Result<Vec<CustomerTableRow>, StoreError>;
}
