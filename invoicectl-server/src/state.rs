//! Application state shared across handlers

use std::sync::Arc;

use invoicectl_core::{Fetcher, RequestScope};

/// Shared application state
///
/// Holds the one `Fetcher` (and with it the cross-request page cache) for
/// the life of the server.
#[derive(Clone)]
pub struct AppState {
    fetcher: Arc<Fetcher>,
}

impl AppState {
    pub fn new(fetcher: Fetcher) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
        }
    }

    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    /// Fresh per-request memo scope.
    pub fn scope(&self) -> RequestScope {
        RequestScope::new(Arc::clone(&self.fetcher))
    }
}
