//! Dashboard overview: three datasets, fetched concurrently or one by one

use serde::{Deserialize, Serialize};

use crate::error::{FetchError, StoreError};
use crate::fetcher::{failed, simulate_latency, Fetcher, LATEST_INVOICES_LIMIT};
use crate::models::{CardData, CardTotals, DashboardData, LatestInvoice, LatestInvoiceRow, Revenue};

pub(crate) const DASHBOARD_FAILED: FetchError =
    FetchError::new("Failed to fetch all dashboard data.");

/// How the overview fetches its three datasets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardStrategy {
    /// All three at once; total latency is the slowest branch
    #[default]
    Parallel,
    /// One after another; total latency is the sum of the branches
    Sequential,
}

impl Fetcher {
    pub async fn fetch_dashboard(
        &self,
        strategy: DashboardStrategy,
    ) -> Result<DashboardData, FetchError> {
        match strategy {
            DashboardStrategy::Parallel => self.fetch_all_dashboard_data().await,
            DashboardStrategy::Sequential => self.fetch_dashboard_sequential().await,
        }
    }

    /// Fan out revenue, latest invoices and card totals, join on all three.
    ///
    /// Fails as a whole if any branch fails.
    pub async fn fetch_all_dashboard_data(&self) -> Result<DashboardData, FetchError> {
        let (revenue, latest, card) = tokio::try_join!(
            self.revenue_branch(),
            self.latest_invoices_branch(),
            self.card_branch(),
        )
        .map_err(failed(DASHBOARD_FAILED))?;

        Ok(merge(revenue, latest, card))
    }

    /// Waterfall variant of [`Fetcher::fetch_all_dashboard_data`].
    pub async fn fetch_dashboard_sequential(&self) -> Result<DashboardData, FetchError> {
        let fetch = async {
            let revenue = self.revenue_branch().await?;
            let latest = self.latest_invoices_branch().await?;
            let card = self.card_branch().await?;
            Ok::<_, StoreError>((revenue, latest, card))
        };

        let (revenue, latest, card) = fetch.await.map_err(failed(DASHBOARD_FAILED))?;
        Ok(merge(revenue, latest, card))
    }

    async fn revenue_branch(&self) -> Result<Vec<Revenue>, StoreError> {
        simulate_latency("revenue", self.delays.revenue()).await;
        self.store.revenue().await
    }

    async fn latest_invoices_branch(&self) -> Result<Vec<LatestInvoiceRow>, StoreError> {
        simulate_latency("latest invoices", self.delays.latest_invoices()).await;
        self.store.latest_invoices(LATEST_INVOICES_LIMIT).await
    }

    async fn card_branch(&self) -> Result<CardTotals, StoreError> {
        simulate_latency("card", self.delays.card_data()).await;
        self.store.card_totals().await
    }
}

fn merge(revenue: Vec<Revenue>, latest: Vec<LatestInvoiceRow>, card: CardTotals) -> DashboardData {
    DashboardData {
        revenue,
        latest_invoices: latest.into_iter().map(LatestInvoice::from).collect(),
        card_data: CardData::from(card),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DemoDelays;
    use crate::memory::{MemoryStore, QueryKind};
    use crate::store::Store;
    use std::sync::Arc;
    use std::time::Duration;

    fn seeded(delays: DemoDelays) -> (Arc<MemoryStore>, Fetcher) {
        let store = Arc::new(MemoryStore::seeded());
        let fetcher = Fetcher::new(Arc::clone(&store) as Arc<dyn Store>, delays);
        (store, fetcher)
    }

    #[tokio::test]
    async fn merges_three_branches() {
        let (store, fetcher) = seeded(DemoDelays::none());
        let data = fetcher.fetch_all_dashboard_data().await.unwrap();

        assert_eq!(data.revenue.len(), 12);
        assert_eq!(data.latest_invoices.len(), 5);
        assert_eq!(data.card_data.number_of_invoices, 13);
        assert_eq!(data.card_data.number_of_customers, 6);
        assert_eq!(store.executed(QueryKind::CardTotals), 1);
    }

    #[tokio::test]
    async fn any_failing_branch_fails_the_whole_call() {
        for kind in [QueryKind::Revenue, QueryKind::LatestInvoices, QueryKind::CardTotals] {
            let (store, fetcher) = seeded(DemoDelays::none());
            store.fail(kind);

            for strategy in [DashboardStrategy::Parallel, DashboardStrategy::Sequential] {
                let err = fetcher.fetch_dashboard(strategy).await.unwrap_err();
                assert_eq!(err.message(), "Failed to fetch all dashboard data.");
            }
        }
    }

    #[tokio::test]
    async fn strategies_agree() {
        let (_, fetcher) = seeded(DemoDelays::none());
        let parallel = fetcher.fetch_dashboard(DashboardStrategy::Parallel).await.unwrap();
        let sequential = fetcher.fetch_dashboard(DashboardStrategy::Sequential).await.unwrap();
        assert_eq!(parallel, sequential);
    }

    #[tokio::test(start_paused = true)]
    async fn fan_out_waits_for_slowest_branch_only() {
        let (_, fetcher) = seeded(DemoDelays::default());

        let started = tokio::time::Instant::now();
        fetcher.fetch_all_dashboard_data().await.unwrap();
        let parallel = started.elapsed();

        let started = tokio::time::Instant::now();
        fetcher.fetch_dashboard_sequential().await.unwrap();
        let sequential = started.elapsed();

        assert!(parallel >= Duration::from_secs(6));
        assert!(parallel < Duration::from_secs(7));
        assert!(sequential >= Duration::from_secs(12));
    }

    #[test]
    fn strategy_parses_lowercase() {
        let s: DashboardStrategy = serde_json::from_str("\"sequential\"").unwrap();
        assert_eq!(s, DashboardStrategy::Sequential);
        assert_eq!(DashboardStrategy::default(), DashboardStrategy::Parallel);
    }
}
