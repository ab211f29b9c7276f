//! Client code for webstash.
//!
//! This crate provides the HTTP fetch pipeline and the read-through caching
//! wrapper shared by the CLI binaries.

pub mod cache;
pub mod fetch;

pub use cache::CachedFetcher;
pub use fetch::{FetchConfig, Fetcher, HttpFetcher};
