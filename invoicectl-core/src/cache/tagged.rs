//! Cross-request cache keyed by a stable key and invalidated by tag
//!
//! Each slot holds either a resolved value or the shared future of the one
//! fetch currently running for that key. Concurrent misses attach to that
//! future instead of starting their own query. Entries never expire and the
//! map is unbounded; the only way out is `revalidate_tag`.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};

type Flight<V, E> = Shared<BoxFuture<'static, Result<Arc<V>, E>>>;

/// Stable cache key: fixed key parts plus the JSON-encoded call arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(key_parts: &[&str], args: &[&str]) -> Self {
        let args = serde_json::Value::from(args).to_string();
        Self(format!("{}:{}", key_parts.join(":"), args))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

enum Slot<V, E> {
    Ready(Arc<V>),
    InFlight { id: u64, flight: Flight<V, E> },
}

struct Entry<V, E> {
    tags: Vec<String>,
    slot: Slot<V, E>,
}

/// Tag-invalidated, single-flight cache
pub struct TagCache<V, E> {
    entries: Mutex<HashMap<CacheKey, Entry<V, E>>>,
    next_flight: AtomicU64,
}

impl<V, E> TagCache<V, E>
where
    V: Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            next_flight: AtomicU64::new(0),
        }
    }

    /// Return the cached value for `key`, or run `fetch` and cache its result
    /// under `tags`.
    ///
    /// `fetch` runs at most once per key at a time. A failure is handed to
    /// every caller waiting on that flight and leaves the key empty.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        key: CacheKey,
        tags: &[&str],
        fetch: F,
    ) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
    {
        let (id, flight) = {
            let mut entries = self.lock();
            match entries.get(&key).map(|entry| &entry.slot) {
                Some(Slot::Ready(value)) => {
                    tracing::debug!(key = %key, "cache hit");
                    return Ok(Arc::clone(value));
                }
                Some(Slot::InFlight { id, flight }) => {
                    tracing::debug!(key = %key, flight = id, "joining in-flight fetch");
                    (*id, flight.clone())
                }
                None => {
                    let id = self.next_flight.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(key = %key, flight = id, "cache miss");

                    let flight = fetch().map(|result| result.map(Arc::new)).boxed().shared();
                    entries.insert(
                        key.clone(),
                        Entry {
                            tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
                            slot: Slot::InFlight {
                                id,
                                flight: flight.clone(),
                            },
                        },
                    );
                    (id, flight)
                }
            }
        };

        let result = flight.await;
        self.settle(&key, id, &result);
        result
    }

    /// Drop every entry registered under `tag`, including in-flight ones.
    ///
    /// A fetch still running for a dropped key completes for its waiters but
    /// its result is not stored. Returns the number of entries removed.
    pub fn revalidate_tag(&self, tag: &str) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| !entry.tags.iter().any(|t| t == tag));
        let cleared = before - entries.len();

        tracing::info!(tag, cleared, "revalidated cache tag");
        cleared
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store the outcome of flight `id`, unless the slot moved on meanwhile.
    fn settle(&self, key: &CacheKey, id: u64, result: &Result<Arc<V>, E>) {
        let mut entries = self.lock();

        let still_current = matches!(
            entries.get(key),
            Some(Entry { slot: Slot::InFlight { id: current, .. }, .. }) if *current == id
        );
        if !still_current {
            return;
        }

        match result {
            Ok(value) => {
                if let Some(entry) = entries.get_mut(key) {
                    entry.slot = Slot::Ready(Arc::clone(value));
                }
            }
            Err(_) => {
                tracing::debug!(key = %key, flight = id, "fetch failed, slot cleared");
                entries.remove(key);
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, Entry<V, E>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V, E> Default for TagCache<V, E>
where
    V: Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
