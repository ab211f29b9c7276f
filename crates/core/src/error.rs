//! Unified error types for webstash.
//!
//! Failures are surfaced, never masked: there are no retries and no silent
//! fallbacks anywhere in the workspace. A store that cannot be reached is an
//! error the caller sees.

/// Unified error types shared across the webstash crates.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Key-value store operation failed (connectivity or command error).
    #[error("STORE_ERROR: {0}")]
    Store(String),

    /// Document database query failed (connectivity or aggregation error).
    #[error("QUERY_ERROR: {0}")]
    Query(String),

    /// A query result row did not have the expected shape.
    #[error("QUERY_ERROR: malformed result row: {0}")]
    MalformedRow(String),

    /// Network-level HTTP failure during a page fetch.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Non-success HTTP status from a page fetch.
    #[error("HTTP_STATUS: status {0}")]
    HttpStatus(u16),
}

impl From<redis::RedisError> for Error {
    fn from(err: redis::RedisError) -> Self {
        Error::Store(err.to_string())
    }
}
