//! Request-scoped view over the shared Fetcher

use std::sync::Arc;

use crate::cache::RequestMemo;
use crate::error::FetchError;
use crate::fetcher::Fetcher;
use crate::models::Revenue;

/// Created once per incoming request, dropped when the response is rendered.
///
/// Revenue is memoized for the scope: every part of one render that asks for
/// it shares a single query.
pub struct RequestScope {
    fetcher: Arc<Fetcher>,
    revenue: RequestMemo<Vec<Revenue>>,
}

impl RequestScope {
    pub fn new(fetcher: Arc<Fetcher>) -> Self {
        Self {
            fetcher,
            revenue: RequestMemo::new(),
        }
    }

    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    pub async fn revenue(&self) -> Result<Arc<Vec<Revenue>>, FetchError> {
        self.revenue
            .get_or_try_fetch(|| self.fetcher.fetch_revenue())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DemoDelays;
    use crate::memory::{MemoryStore, QueryKind};
    use crate::store::Store;

    #[tokio::test]
    async fn revenue_is_fetched_once_per_scope() {
        let store = Arc::new(MemoryStore::seeded());
        let fetcher = Arc::new(Fetcher::new(
            Arc::clone(&store) as Arc<dyn Store>,
            DemoDelays::none(),
        ));

        let scope = RequestScope::new(Arc::clone(&fetcher));
        let (a, b) = tokio::join!(scope.revenue(), scope.revenue());
        let c = scope.revenue().await.unwrap();

        assert!(Arc::ptr_eq(&a.unwrap(), &c));
        assert!(Arc::ptr_eq(&b.unwrap(), &c));
        assert_eq!(store.executed(QueryKind::Revenue), 1);

        let next_request = RequestScope::new(fetcher);
        next_request.revenue().await.unwrap();
        assert_eq!(store.executed(QueryKind::Revenue), 2);
    }
}
