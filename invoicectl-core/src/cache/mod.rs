//! Memoization wrappers around fetchers
//!
//! - `RequestMemo`: lives for one request, collapses duplicate calls
//! - `TagCache`: lives across requests, single-flight per key, cleared by tag

pub mod request;
pub mod tagged;

pub use request::RequestMemo;
pub use tagged::{CacheKey, TagCache};
