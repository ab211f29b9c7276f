//! In-memory store backend.
//!
//! Mirrors the Redis semantics the cache layer relies on: counters never
//! expire, values written with `set_ex` read as absent once their deadline
//! passes. Expiry is checked lazily on `get` against the tokio clock, which
//! lets tests drive TTL transitions under a paused clock.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

use super::KvStore;
use crate::Error;

#[derive(Default)]
struct Inner {
    counters: HashMap<String, u64>,
    values: HashMap<String, (String, Instant)>,
}

/// In-process key-value store with TTL support.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current counter value, or 0 if never incremented.
    ///
    /// Test-observation helper; the [`KvStore`] surface only increments.
    pub async fn counter(&self, key: &str) -> u64 {
        self.inner.lock().await.counters.get(key).copied().unwrap_or(0)
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn incr(&self, key: &str) -> Result<u64, Error> {
        let mut inner = self.inner.lock().await;
        let value = inner.counters.entry(key.to_string()).or_insert(0);
        *value += 1;
        Ok(*value)
    }

    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let mut inner = self.inner.lock().await;
        let now = Instant::now();
        if matches!(inner.values.get(key), Some((_, deadline)) if *deadline <= now) {
            inner.values.remove(key);
            return Ok(None);
        }
        Ok(inner.values.get(key).map(|(value, _)| value.clone()))
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), Error> {
        let mut inner = self.inner.lock().await;
        inner
            .values
            .insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
        Ok(())
    }
}
