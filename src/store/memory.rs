//! Memory Store Module
//!
//! HashMap-backed key-value store with TTL expiration.

use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use crate::error::Result;
use crate::store::entry::{current_timestamp_ms, deadline_from, StoreEntry};
use crate::store::KeyValueStore;

// == Memory Store ==
/// Unbounded in-memory store.
///
/// Expiring entries are also indexed by deadline so that draining them costs
/// O(expired · log n) instead of a full scan.
#[derive(Debug)]
pub struct MemoryStore<V> {
    /// Key-value storage
    entries: HashMap<String, StoreEntry<V>>,
    /// (deadline ms, key) for every entry with a TTL
    deadlines: BTreeSet<(u64, String)>,
}

impl<V> MemoryStore<V> {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            deadlines: BTreeSet::new(),
        }
    }

    /// Remaining TTL of a live key. `None` when absent or when the key never expires.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        self.live_entry(key).and_then(StoreEntry::ttl_remaining)
    }

    fn live_entry(&self, key: &str) -> Option<&StoreEntry<V>> {
        self.entries.get(key).filter(|entry| !entry.is_expired())
    }

    fn unindex(&mut self, key: &str, expires_at: Option<u64>) {
        if let Some(deadline) = expires_at {
            self.deadlines.remove(&(deadline, key.to_string()));
        }
    }
}

impl<V> Default for MemoryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> KeyValueStore for MemoryStore<V> {
    type Value = V;

    fn lookup(&self, key: &str) -> Result<Option<V>> {
        Ok(self.live_entry(key).map(|entry| entry.value.clone()))
    }

    fn insert(&mut self, key: &str, value: V, ttl: Option<Duration>) -> Result<()> {
        let entry = StoreEntry::new(value, ttl);
        if let Some(deadline) = entry.expires_at {
            self.deadlines.insert((deadline, key.to_string()));
        }

        if let Some(previous) = self.entries.insert(key.to_string(), entry) {
            // Same deadline as the new entry means the index slot is shared
            if previous.expires_at != self.entries.get(key).and_then(|e| e.expires_at) {
                self.unindex(key, previous.expires_at);
            }
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        match self.entries.remove(key) {
            Some(entry) => {
                self.unindex(key, entry.expires_at);
                Ok(!entry.is_expired())
            }
            None => Ok(false),
        }
    }

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.live_entry(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let now = current_timestamp_ms();
        Ok(self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect())
    }

    fn len(&self) -> usize {
        let now = current_timestamp_ms();
        let expired = self
            .deadlines
            .iter()
            .take_while(|(deadline, _)| *deadline <= now)
            .count();
        self.entries.len().saturating_sub(expired)
    }

    fn expire(&mut self, key: &str, ttl: Option<Duration>) -> Result<bool> {
        let now = current_timestamp_ms();
        let previous = match self.entries.get_mut(key) {
            Some(entry) if !entry.is_expired_at(now) => {
                let previous = entry.expires_at;
                entry.expires_at = ttl.map(|ttl| deadline_from(now, ttl));
                if let Some(deadline) = entry.expires_at {
                    self.deadlines.insert((deadline, key.to_string()));
                }
                previous
            }
            _ => return Ok(false),
        };

        let current = self.entries.get(key).and_then(|e| e.expires_at);
        if previous != current {
            self.unindex(key, previous);
        }
        Ok(true)
    }

    fn drain_expired(&mut self) -> Result<Vec<String>> {
        let now = current_timestamp_ms();
        let mut expired = Vec::new();

        while let Some((deadline, _)) = self.deadlines.first() {
            if *deadline > now {
                break;
            }
            if let Some((_, key)) = self.deadlines.pop_first() {
                self.entries.remove(&key);
                expired.push(key);
            }
        }

        Ok(expired)
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.deadlines.clear();
        Ok(())
    }
}
