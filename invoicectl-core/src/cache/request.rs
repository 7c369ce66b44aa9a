//! Per-request memoization

use std::future::Future;
use std::sync::Arc;

use tokio::sync::OnceCell;

/// Memoizes one argument-less fetch for the lifetime of a request.
///
/// Every call after the first successful one returns the same `Arc`.
/// Concurrent callers wait for the call already running. A failed fetch is
/// not remembered; the next caller runs it again.
#[derive(Debug)]
pub struct RequestMemo<T> {
    cell: OnceCell<Arc<T>>,
}

impl<T> RequestMemo<T> {
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    pub async fn get_or_try_fetch<E, F, Fut>(&self, fetch: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.cell.get() {
            tracing::debug!("request memo hit");
            return Ok(Arc::clone(value));
        }

        self.cell
            .get_or_try_init(|| async move { fetch().await.map(Arc::new) })
            .await
            .map(Arc::clone)
    }

    pub fn is_filled(&self) -> bool {
        self.cell.initialized()
    }
}

impl<T> Default for RequestMemo<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn second_call_reuses_first_result() {
        let memo = RequestMemo::new();
        let calls = AtomicUsize::new(0);
        let calls = &calls;

        let fetch = move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ()>(vec![1, 2, 3])
        };

        let a = memo.get_or_try_fetch(fetch).await.unwrap();
        let b = memo.get_or_try_fetch(fetch).await.unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_calls_share_one_fetch() {
        let memo = RequestMemo::new();
        let calls = AtomicUsize::new(0);
        let calls = &calls;

        let fetch = move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            Ok::<_, ()>("rows")
        };

        let (a, b) = tokio::join!(memo.get_or_try_fetch(fetch), memo.get_or_try_fetch(fetch));

        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failures_are_not_memoized() {
        let memo: RequestMemo<u32> = RequestMemo::new();

        let err = memo.get_or_try_fetch(|| async { Err("down") }).await;
        assert_eq!(err.unwrap_err(), "down");
        assert!(!memo.is_filled());

        let ok = memo.get_or_try_fetch(|| async { Ok::<_, &str>(7) }).await;
        assert_eq!(*ok.unwrap(), 7);
    }
}
