//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (WEBSTASH_*)
//! 2. TOML config file (if WEBSTASH_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (WEBSTASH_*)
/// 2. TOML config file (if WEBSTASH_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Redis connection URL for the page cache and access counters.
    ///
    /// Set via WEBSTASH_REDIS_URL environment variable.
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// MongoDB connection URI for the log collection.
    ///
    /// Set via WEBSTASH_MONGO_URI environment variable.
    #[serde(default = "default_mongo_uri")]
    pub mongo_uri: String,

    /// Logical database holding the access-log collection.
    #[serde(default = "default_mongo_db")]
    pub mongo_db: String,

    /// Collection name for access-log documents.
    #[serde(default = "default_mongo_collection")]
    pub mongo_collection: String,

    /// Cache entry time-to-live in seconds.
    ///
    /// Set via WEBSTASH_CACHE_TTL_SECS environment variable.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Number of IPs reported by the top-IPs query.
    ///
    /// Set via WEBSTASH_TOP_LIMIT environment variable.
    #[serde(default = "default_top_limit")]
    pub top_limit: u32,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via WEBSTASH_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via WEBSTASH_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_redis_url() -> String {
    "redis://127.0.0.1/".into()
}

fn default_mongo_uri() -> String {
    "mongodb://127.0.0.1:27017".into()
}

fn default_mongo_db() -> String {
    "logs".into()
}

fn default_mongo_collection() -> String {
    "nginx".into()
}

fn default_cache_ttl_secs() -> u64 {
    10
}

fn default_top_limit() -> u32 {
    10
}

fn default_user_agent() -> String {
    "webstash/0.1".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            redis_url: default_redis_url(),
            mongo_uri: default_mongo_uri(),
            mongo_db: default_mongo_db(),
            mongo_collection: default_mongo_collection(),
            cache_ttl_secs: default_cache_ttl_secs(),
            top_limit: default_top_limit(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl AppConfig {
    /// Cache TTL as Duration for use with the store.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `WEBSTASH_`
    /// 2. TOML file from `WEBSTASH_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("WEBSTASH_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("WEBSTASH_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
