//! Structured error types for invoicectl-core.
//!
//! Two layers: `StoreError` is what a store backend reports, and is only
//! ever logged. `FetchError` is what a fetcher hands to its caller: a fixed,
//! user-facing message per call site with no backend detail attached.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure reported by a [`Store`](crate::store::Store) implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend (database driver, pool, network) failed
    #[error("store backend error: {source}")]
    Backend {
        #[source]
        source: BoxError,
    },

    /// A row came back with a value the domain cannot represent
    #[error("cannot decode column '{column}' from value '{value}'")]
    Decode { column: &'static str, value: String },

    /// The store refused the query (used by the in-memory store for fault injection)
    #[error("store unavailable for query '{query}'")]
    Unavailable { query: &'static str },
}

impl StoreError {
    /// Wrap any backend error
    pub fn backend(source: impl Into<BoxError>) -> Self {
        Self::Backend {
            source: source.into(),
        }
    }

    /// Create a decode error
    pub fn decode(column: &'static str, value: impl Into<String>) -> Self {
        Self::Decode {
            column,
            value: value.into(),
        }
    }
}

/// The single user-facing failure kind raised by every fetcher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FetchError {
    message: &'static str,
}

impl FetchError {
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }

    pub fn message(&self) -> &'static str {
        self.message
    }
}
