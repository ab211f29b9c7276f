//! log-stats entry point.
//!
//! Connects to the configured MongoDB collection, runs the three
//! aggregation queries, and prints the summary to stdout. Logging goes to
//! stderr so the report stays clean. No flags; configuration comes from
//! the environment.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use webstash_core::AppConfig;
use webstash_logs::LogStats;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load()?;

    tracing::info!(db = %config.mongo_db, collection = %config.mongo_collection, "running log stats");

    let stats = LogStats::connect(&config.mongo_uri, &config.mongo_db, &config.mongo_collection).await?;
    let report = stats.report(config.top_limit).await?;

    print!("{report}");

    Ok(())
}
