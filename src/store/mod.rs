//! Store Module
//!
//! The unbounded key-value layer the cache sits on. The cache only talks to
//! it through [`KeyValueStore`]; [`MemoryStore`] is the in-process
//! implementation.

mod entry;
mod memory;

use std::time::Duration;

use crate::error::Result;

pub use entry::{current_timestamp_ms, StoreEntry};
pub use memory::MemoryStore;

// == Key-Value Store ==
/// Unordered key-value storage with per-key expiry.
///
/// Implementations own TTL handling. Expired entries must be reported as
/// absent by every query, whether or not they have been physically removed
/// yet, and `drain_expired` must hand back each expired key exactly once.
pub trait KeyValueStore {
    /// Payload type. The cache never looks inside it.
    type Value: Clone;

    /// Returns the value for `key`, or `None` if absent or expired.
    fn lookup(&self, key: &str) -> Result<Option<Self::Value>>;

    /// Inserts or replaces `key`.
    fn insert(&mut self, key: &str, value: Self::Value, ttl: Option<Duration>) -> Result<()>;

    /// Removes `key`, returning whether a live entry was present.
    fn remove(&mut self, key: &str) -> Result<bool>;

    /// Checks whether `key` is present and not expired.
    fn contains(&self, key: &str) -> Result<bool>;

    /// Enumerates live keys in no particular order.
    fn keys(&self) -> Result<Vec<String>>;

    /// Number of live entries. Expired entries do not count, drained or not.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces the TTL of a live key. Returns false if the key is absent.
    fn expire(&mut self, key: &str, ttl: Option<Duration>) -> Result<bool>;

    /// Removes every expired entry and returns their keys.
    fn drain_expired(&mut self) -> Result<Vec<String>>;

    /// Removes everything.
    fn clear(&mut self) -> Result<()>;
}
