//! `Store` backed by PostgreSQL

use async_trait::async_trait;
use sqlx::PgPool;

use invoicectl_core::models::{
    CardTotals, CustomerField, CustomerTableRow, InvoiceRecord, InvoiceTableRow,
    LatestInvoiceRow, Revenue, StatusTotals,
};
use invoicectl_core::{Store, StoreError};

use super::repos::{CustomerRepo, InvoiceRepo, RevenueRepo};

/// Query executor over a shared pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn revenue(&self) -> Result<Vec<Revenue>, StoreError> {
        RevenueRepo::new(&self.pool).all().await
    }

    async fn latest_invoices(&self, limit: u32) -> Result<Vec<LatestInvoiceRow>, StoreError> {
        InvoiceRepo::new(&self.pool).latest(limit).await
    }

    async fn invoice_count(&self) -> Result<i64, StoreError> {
        InvoiceRepo::new(&self.pool).count().await
    }

    async fn customer_count(&self) -> Result<i64, StoreError> {
        CustomerRepo::new(&self.pool).count().await
    }

    async fn status_totals(&self) -> Result<StatusTotals, StoreError> {
        InvoiceRepo::new(&self.pool).status_totals().await
    }

    async fn card_totals(&self) -> Result<CardTotals, StoreError> {
        InvoiceRepo::new(&self.pool).card_totals().await
    }

    async fn filtered_invoices(
        &self,
        query: &str,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<InvoiceTableRow>, StoreError> {
        InvoiceRepo::new(&self.pool).search(query, limit, offset).await
    }

    async fn count_filtered_invoices(&self, query: &str) -> Result<i64, StoreError> {
        InvoiceRepo::new(&self.pool).count_matching(query).await
    }

    async fn invoice_by_id(&self, id: &str) -> Result<Option<InvoiceRecord>, StoreError> {
        InvoiceRepo::new(&self.pool).get(id).await
    }

    async fn customers(&self) -> Result<Vec<CustomerField>, StoreError> {
        CustomerRepo::new(&self.pool).list().await
    }

    async fn filtered_customers(&self, query: &str) -> Result<Vec<CustomerTableRow>, StoreError> {
        CustomerRepo::new(&self.pool).search(query).await
    }
}
