//! Recency Cache - An in-process bounded key-value cache
//!
//! Layers a maximum entry count and least-recently-used eviction over an
//! unbounded key-value store with TTL expiration.

pub mod cache;
pub mod config;
pub mod error;
pub mod store;
pub mod tasks;

pub use cache::{BoundedCache, CacheStats, SharedCache};
pub use config::Config;
pub use error::{CacheError, Result};
pub use store::{KeyValueStore, MemoryStore};
pub use tasks::spawn_cleanup_task;
