//! Redis-backed store.
//!
//! Wraps an async connection manager; expiration is delegated entirely to
//! Redis's native `SETEX` TTL handling. The store is an explicitly
//! constructed dependency with connect-on-construction, not a module-level
//! singleton.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use super::KvStore;
use crate::Error;

/// Production key-value store over Redis.
///
/// The connection manager multiplexes one connection and reconnects on
/// failure of the link itself; command failures still surface as errors.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connect to Redis at the given URL (e.g. `redis://127.0.0.1/`).
    ///
    /// # Errors
    ///
    /// Returns `Error::Store` if the URL is invalid or the initial
    /// connection cannot be established.
    pub async fn connect(url: &str) -> Result<Self, Error> {
        let client = redis::Client::open(url)?;
        let conn = client.get_connection_manager().await?;
        tracing::debug!(url, "connected to redis");
        Ok(Self { conn })
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn incr(&self, key: &str) -> Result<u64, Error> {
        let mut conn = self.conn.clone();
        let value: u64 = conn.incr(key, 1).await?;
        Ok(value)
    }

    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), Error> {
        let mut conn = self.conn.clone();
        let () = conn.set_ex(key, value, ttl.as_secs()).await?;
        Ok(())
    }
}
