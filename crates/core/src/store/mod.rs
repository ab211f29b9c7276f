//! Key-value store abstraction for the page cache and access counters.
//!
//! The cache layer consumes exactly three store operations: `INCR`, `GET`,
//! and `SETEX`. This module exposes them behind the [`KvStore`] trait with:
//!
//! - [`RedisStore`]: production backend over an async Redis connection
//! - [`MemoryStore`]: in-process backend for tests and Redis-less runs
//!
//! Each operation is atomic at the store level. Sequences of operations are
//! not; callers own any cross-operation races.

pub mod keys;
pub mod memory;
pub mod redis_store;

use std::time::Duration;

use async_trait::async_trait;

use crate::Error;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

/// Minimal key-value store surface consumed by the caching layer.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Increment the integer at `key` by one, creating it at 0 first if
    /// absent. Returns the value after the increment.
    async fn incr(&self, key: &str) -> Result<u64, Error>;

    /// Read the value at `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Write `value` at `key` with the given time-to-live.
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), Error>;
}
