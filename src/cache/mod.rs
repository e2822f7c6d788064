//! Cache Module
//!
//! Bounded, recency-ordered caching on top of a [`KeyValueStore`](crate::store::KeyValueStore).

mod bounded;
mod recency;
mod shared;
mod stats;


// Re-export public types
pub use bounded::BoundedCache;
pub use recency::{Iter, RecencyTracker};
pub use shared::SharedCache;
pub use stats::CacheStats;
