//! Single-entity fetchers
//!
//! Each fetcher issues its query through the Store, shapes the rows for
//! display and, when demo delays are on, sleeps to simulate a slow network.
//! Store failures are logged here and replaced with a fixed message for the
//! call site; nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheKey, TagCache};
use crate::config::DemoDelays;
use crate::error::{FetchError, StoreError};
use crate::models::{
    CardData, CardTotals, CustomerField, CustomerTable, InvoiceForm, InvoiceTableRow,
    LatestInvoice, Revenue,
};
use crate::pagination::{total_pages, Pagination};
use crate::store::Store;

/// Rows on the latest-invoices card
pub const LATEST_INVOICES_LIMIT: u32 = 5;

/// Tag registered by the cached total-pages fetcher
pub const INVOICE_PAGES_TAG: &str = "i-p";

const INVOICE_PAGES_KEY: &[&str] = &["invoice-pages"];

pub(crate) const REVENUE_FAILED: FetchError = FetchError::new("Failed to fetch revenue data.");
pub(crate) const LATEST_INVOICES_FAILED: FetchError =
    FetchError::new("Failed to fetch the latest invoices.");
pub(crate) const CARD_DATA_FAILED: FetchError = FetchError::new("Failed to fetch card data.");
pub(crate) const INVOICES_FAILED: FetchError = FetchError::new("Failed to fetch invoices.");
pub(crate) const INVOICE_PAGES_FAILED: FetchError =
    FetchError::new("Failed to fetch total number of invoices.");
pub(crate) const INVOICE_FAILED: FetchError = FetchError::new("Failed to fetch invoice.");
pub(crate) const CUSTOMERS_FAILED: FetchError = FetchError::new("Failed to fetch all customers.");
pub(crate) const CUSTOMER_TABLE_FAILED: FetchError =
    FetchError::new("Failed to fetch customer table.");

/// Data-access entry point shared by every request
pub struct Fetcher {
    pub(crate) store: Arc<dyn Store>,
    pub(crate) delays: DemoDelays,
    page_cache: TagCache<u32, FetchError>,
}

impl Fetcher {
    pub fn new(store: Arc<dyn Store>, delays: DemoDelays) -> Self {
        Self {
            store,
            delays,
            page_cache: TagCache::new(),
        }
    }

    pub fn delays(&self) -> &DemoDelays {
        &self.delays
    }

    pub async fn fetch_revenue(&self) -> Result<Vec<Revenue>, FetchError> {
        simulate_latency("revenue", self.delays.revenue()).await;
        self.store.revenue().await.map_err(failed(REVENUE_FAILED))
    }

    pub async fn fetch_latest_invoices(&self) -> Result<Vec<LatestInvoice>, FetchError> {
        let rows = self
            .store
            .latest_invoices(LATEST_INVOICES_LIMIT)
            .await
            .map_err(failed(LATEST_INVOICES_FAILED))?;

        let latest = rows.into_iter().map(LatestInvoice::from).collect();
        simulate_latency("latest invoices", self.delays.latest_invoices()).await;
        Ok(latest)
    }

    /// Card figures from three independent queries run concurrently.
    pub async fn fetch_card_data(&self) -> Result<CardData, FetchError> {
        let (invoice_count, customer_count, totals) = tokio::try_join!(
            self.store.invoice_count(),
            self.store.customer_count(),
            self.store.status_totals(),
        )
        .map_err(failed(CARD_DATA_FAILED))?;

        simulate_latency("card", self.delays.card_data()).await;

        Ok(CardData::from(CardTotals {
            invoice_count,
            customer_count,
            totals,
        }))
    }

    /// One page of the invoices table for `query`.
    pub async fn fetch_filtered_invoices(
        &self,
        query: &str,
        current_page: u32,
    ) -> Result<Vec<InvoiceTableRow>, FetchError> {
        let page = Pagination::new(current_page);
        self.store
            .filtered_invoices(query, page.limit(), page.offset())
            .await
            .map_err(failed(INVOICES_FAILED))
    }

    /// Number of invoice-table pages for `query`.
    pub async fn fetch_invoices_pages(&self, query: &str) -> Result<u32, FetchError> {
        count_pages(self.store.as_ref(), query, self.delays.invoice_pages()).await
    }

    /// Same as [`Fetcher::fetch_invoices_pages`], cached across requests
    /// under the `i-p` tag until [`Fetcher::revalidate_tag`] clears it.
    pub async fn fetch_invoices_pages_cached(&self, query: &str) -> Result<u32, FetchError> {
        let store = Arc::clone(&self.store);
        let delay = self.delays.invoice_pages();
        let owned_query = query.to_owned();

        let pages = self
            .page_cache
            .get_or_fetch(
                CacheKey::new(INVOICE_PAGES_KEY, &[query]),
                &[INVOICE_PAGES_TAG],
                move || async move { count_pages(store.as_ref(), &owned_query, delay).await },
            )
            .await?;

        Ok(*pages)
    }

    /// External invalidation signal for the cross-request cache.
    pub fn revalidate_tag(&self, tag: &str) -> usize {
        self.page_cache.revalidate_tag(tag)
    }

    /// Page-count slots currently held, settled or in flight.
    pub fn cached_page_counts(&self) -> usize {
        self.page_cache.len()
    }

    /// Invoice for the edit form, `None` if no invoice has that id.
    pub async fn fetch_invoice_by_id(&self, id: &str) -> Result<Option<InvoiceForm>, FetchError> {
        let record = self
            .store
            .invoice_by_id(id)
            .await
            .map_err(failed(INVOICE_FAILED))?;

        Ok(record.map(InvoiceForm::from))
    }

    pub async fn fetch_customers(&self) -> Result<Vec<CustomerField>, FetchError> {
        self.store
            .customers()
            .await
            .map_err(failed(CUSTOMERS_FAILED))
    }

    pub async fn fetch_filtered_customers(
        &self,
        query: &str,
    ) -> Result<Vec<CustomerTable>, FetchError> {
        let rows = self
            .store
            .filtered_customers(query)
            .await
            .map_err(failed(CUSTOMER_TABLE_FAILED))?;

        Ok(rows.into_iter().map(CustomerTable::from).collect())
    }
}

async fn count_pages(store: &dyn Store, query: &str, delay: Duration) -> Result<u32, FetchError> {
    let count = store
        .count_filtered_invoices(query)
        .await
        .map_err(failed(INVOICE_PAGES_FAILED))?;

    simulate_latency("total pages", delay).await;
    Ok(total_pages(count.max(0) as u64))
}

/// Log the store failure and replace it with the call site's message.
pub(crate) fn failed(error: FetchError) -> impl FnOnce(StoreError) -> FetchError {
    move |source| {
        tracing::error!(error = %source, context = error.message(), "database error");
        error
    }
}

/// Sleep for a demo delay, logging before and after.
pub(crate) async fn simulate_latency(label: &'static str, delay: Duration) {
    if delay.is_zero() {
        return;
    }

    tracing::info!("Fetching {} data...", label);
    tokio::time::sleep(delay).await;
    tracing::info!(
        delay_ms = delay.as_millis() as u64,
        "{} completed after {:.1} seconds",
        label,
        delay.as_secs_f64()
    );
}
