//! HTTP page fetching.
//!
//! - Single-argument contract: URL in, body text out.
//! - Non-2xx statuses are errors, not bodies.
//! - Max redirects: 5 (configurable)
//!
//! The [`Fetcher`] trait is the seam the caching layer wraps; tests stand in
//! stub fetchers, production uses [`HttpFetcher`] over reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use webstash_core::Error;

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "webstash/0.1")
    pub user_agent: String,

    /// Request timeout (default: 20s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "webstash/0.1".to_string(),
            timeout: Duration::from_millis(20_000),
            max_redirects: 5,
        }
    }
}

/// A single-argument page fetch: URL in, body text out.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, Error>;
}

/// HTTP fetcher over reqwest.
pub struct HttpFetcher {
    http: Client,
}

impl HttpFetcher {
    /// Create a new fetcher with the given configuration.
    pub fn new(config: &FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::HttpError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, Error> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::HttpError(format!("network error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::HttpError(format!("failed to read response: {}", e)))?;

        tracing::debug!(url, bytes = body.len(), "fetched page");

        Ok(body)
    }
}
