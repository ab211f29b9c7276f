//! Core types and shared functionality for webstash.
//!
//! This crate provides:
//! - Key-value store abstraction with Redis and in-memory backends
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod error;
pub mod store;

pub use config::AppConfig;
pub use error::Error;
pub use store::{KvStore, MemoryStore, RedisStore};
