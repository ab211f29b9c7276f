//! Read-through page cache with per-URL access counting.
//!
//! [`CachedFetcher`] wraps a [`Fetcher`] behind a [`KvStore`], exposing the
//! same call shape. Per call:
//!
//! 1. `INCR count:<url>` — always, exactly once, hit or miss
//! 2. `GET <url>` — on a hit, return the cached body; the inner fetch is
//!    not invoked
//! 3. on a miss, invoke the inner fetch, `SETEX <url> <ttl> <body>`, return
//!
//! Counting precedes the cache check so the counter reflects caller-visible
//! load; hit/miss ratio is derivable externally from count vs. distinct
//! fetch invocations.
//!
//! Each store operation is atomic, the three-step sequence is not: two
//! concurrent misses for one key may both fetch and both write. Last write
//! wins with the same TTL, so the entries converge. Accepted race.

use std::time::Duration;

use webstash_core::store::keys::count_key;
use webstash_core::{Error, KvStore};

use crate::fetch::Fetcher;

/// A [`Fetcher`] wrapped with a counting read-through cache.
///
/// Both the store and the inner fetcher are injected; the wrapper owns no
/// connection state of its own.
pub struct CachedFetcher<S, F> {
    store: S,
    fetcher: F,
    ttl: Duration,
}

impl<S: KvStore, F: Fetcher> CachedFetcher<S, F> {
    pub fn new(store: S, fetcher: F, ttl: Duration) -> Self {
        Self { store, fetcher, ttl }
    }

    /// Fetch `url` through the cache.
    ///
    /// Store failures surface as errors; the inner fetch is never invoked
    /// as a silent fallback. An inner fetch failure propagates without
    /// caching anything, after the counter for this call has already been
    /// incremented.
    pub async fn get_page(&self, url: &str) -> Result<String, Error> {
        let calls = self.store.incr(&count_key(url)).await?;

        if let Some(body) = self.store.get(url).await? {
            tracing::debug!(url, calls, "cache hit");
            return Ok(body);
        }

        let body = self.fetcher.fetch(url).await?;
        self.store.set_ex(url, &body, self.ttl).await?;
        tracing::debug!(url, calls, bytes = body.len(), "cache miss, stored");

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use webstash_core::MemoryStore;

    const TTL: Duration = Duration::from_secs(10);

    /// Fetcher returning a body derived from the URL and an invocation
    /// serial, so repeated fetches are distinguishable.
    #[derive(Default)]
    struct StubFetcher {
        calls: AtomicUsize,
    }

    impl StubFetcher {
        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Fetcher for &StubFetcher {
        async fn fetch(&self, url: &str) -> Result<String, Error> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(format!("body of {url} (fetch #{n})"))
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl Fetcher for FailingFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, Error> {
            Err(Error::HttpStatus(500))
        }
    }

    /// Store where every operation fails, as if Redis were unreachable.
    struct DownStore;

    #[async_trait]
    impl KvStore for DownStore {
        async fn incr(&self, _key: &str) -> Result<u64, Error> {
            Err(Error::Store("connection refused".into()))
        }

        async fn get(&self, _key: &str) -> Result<Option<String>, Error> {
            Err(Error::Store("connection refused".into()))
        }

        async fn set_ex(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), Error> {
            Err(Error::Store("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_first_call_fetches_and_counts() {
        let fetcher = StubFetcher::default();
        let cached = CachedFetcher::new(MemoryStore::new(), &fetcher, TTL);

        let body = cached.get_page("http://example.com").await.unwrap();
        assert_eq!(body, "body of http://example.com (fetch #1)");
        assert_eq!(fetcher.call_count(), 1);
        assert_eq!(cached.store.counter("count:http://example.com").await, 1);
    }

    #[tokio::test]
    async fn test_second_call_within_ttl_is_a_hit() {
        let fetcher = StubFetcher::default();
        let cached = CachedFetcher::new(MemoryStore::new(), &fetcher, TTL);

        let first = cached.get_page("http://example.com").await.unwrap();
        let second = cached.get_page("http://example.com").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(fetcher.call_count(), 1);
        assert_eq!(cached.store.counter("count:http://example.com").await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refetches_after_ttl_elapses() {
        let fetcher = StubFetcher::default();
        let cached = CachedFetcher::new(MemoryStore::new(), &fetcher, TTL);

        cached.get_page("http://example.com").await.unwrap();
        tokio::time::advance(Duration::from_secs(11)).await;
        let body = cached.get_page("http://example.com").await.unwrap();

        assert_eq!(body, "body of http://example.com (fetch #2)");
        assert_eq!(fetcher.call_count(), 2);
        assert_eq!(cached.store.counter("count:http://example.com").await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cached_value_frozen_within_ttl() {
        // The stub would return a different body on re-invocation; within
        // the TTL the caller keeps seeing the stored one.
        let fetcher = StubFetcher::default();
        let cached = CachedFetcher::new(MemoryStore::new(), &fetcher, TTL);

        let first = cached.get_page("http://example.com").await.unwrap();
        tokio::time::advance(Duration::from_secs(5)).await;
        let second = cached.get_page("http://example.com").await.unwrap();
        tokio::time::advance(Duration::from_secs(4)).await;
        let third = cached.get_page("http://example.com").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first, third);
        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn test_distinct_urls_counted_separately() {
        let fetcher = StubFetcher::default();
        let cached = CachedFetcher::new(MemoryStore::new(), &fetcher, TTL);

        cached.get_page("http://a.example").await.unwrap();
        cached.get_page("http://a.example").await.unwrap();
        cached.get_page("http://b.example").await.unwrap();

        assert_eq!(cached.store.counter("count:http://a.example").await, 2);
        assert_eq!(cached.store.counter("count:http://b.example").await, 1);
        assert_eq!(fetcher.call_count(), 2);
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_without_fetching() {
        let fetcher = StubFetcher::default();
        let cached = CachedFetcher::new(DownStore, &fetcher, TTL);

        let result = cached.get_page("http://example.com").await;
        assert!(matches!(result, Err(Error::Store(_))));
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_counts_but_caches_nothing() {
        let cached = CachedFetcher::new(MemoryStore::new(), FailingFetcher, TTL);

        let result = cached.get_page("http://example.com").await;
        assert!(matches!(result, Err(Error::HttpStatus(500))));
        assert_eq!(cached.store.counter("count:http://example.com").await, 1);
        assert_eq!(cached.store.get("http://example.com").await.unwrap(), None);
    }
}
