//! get-page entry point.
//!
//! Fetches one URL through the counting read-through cache and prints the
//! body to stdout. Repeated runs within the TTL hit the cache; every run
//! bumps the URL's access counter in Redis.

use anyhow::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use webstash_client::{CachedFetcher, FetchConfig, HttpFetcher};
use webstash_core::{AppConfig, RedisStore};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let Some(url) = std::env::args().nth(1) else {
        bail!("usage: get-page <url>");
    };

    let config = AppConfig::load()?;

    tracing::info!(%url, ttl_secs = config.cache_ttl_secs, "fetching through cache");

    let store = RedisStore::connect(&config.redis_url)
        .await
        .context("failed to connect to redis")?;
    let fetcher = HttpFetcher::new(&FetchConfig {
        user_agent: config.user_agent.clone(),
        timeout: config.timeout(),
        ..Default::default()
    })?;
    let cached = CachedFetcher::new(store, fetcher, config.cache_ttl());

    let body = cached.get_page(&url).await?;
    print!("{body}");

    Ok(())
}
