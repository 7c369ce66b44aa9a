pub mod cache;
pub mod config;
pub mod currency;
pub mod dashboard;
pub mod error;
pub mod fetcher;
pub mod memory;
pub mod models;
pub mod pagination;
pub mod placeholder;
pub mod scope;
pub mod search;
pub mod store;

pub use cache::{CacheKey, RequestMemo, TagCache};
pub use config::{DemoDelays, InvoicectlConfig};
pub use currency::{cents_to_dollars, format_currency};
pub use dashboard::DashboardStrategy;
pub use error::{FetchError, StoreError};
pub use fetcher::{Fetcher, INVOICE_PAGES_TAG, LATEST_INVOICES_LIMIT};
pub use memory::{MemoryStore, QueryKind};
pub use pagination::{total_pages, Pagination, ITEMS_PER_PAGE};
pub use scope::RequestScope;
pub use search::SearchParams;
pub use store::Store;
