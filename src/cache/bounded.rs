//! Bounded Cache Module
//!
//! Main cache engine: layers a capacity bound and LRU eviction over an
//! unbounded [`KeyValueStore`].

use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheStats, RecencyTracker};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::store::KeyValueStore;

// == Bounded Cache ==
/// Key-value cache holding at most `max_size` live entries.
///
/// Every call that can change state first reaps keys the store reports as
/// expired, so after each completed call the tracker holds exactly the
/// store's live keys. Read-only queries filter out keys that expired since.
/// `max_size == 0` disables eviction.
///
/// A TTL of zero means "no expiry", the same as `None`.
#[derive(Debug)]
pub struct BoundedCache<S> {
    /// Underlying unbounded storage
    store: S,
    /// LRU access tracker
    recency: RecencyTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of live entries, 0 = unbounded
    max_size: usize,
}

impl<S: KeyValueStore> BoundedCache<S> {
    // == Constructor ==
    /// Creates a cache over `store` holding at most `max_size` entries.
    ///
    /// Entries already present in `store` are adopted in the store's
    /// enumeration order and trimmed to the bound.
    pub fn new(store: S, max_size: usize) -> Result<Self> {
        let mut cache = Self {
            store,
            recency: RecencyTracker::new(),
            stats: CacheStats::new(),
            max_size,
        };
        for key in cache.store.keys()? {
            cache.recency.touch(&key);
        }
        cache.reap_expired()?;
        cache.evict_for(0)?;
        Ok(cache)
    }

    /// Creates a cache using the bound from `config`.
    pub fn from_config(store: S, config: &Config) -> Result<Self> {
        Self::new(store, config.max_size)
    }

    // == Get ==
    /// Retrieves a value by key and marks it most recently used.
    ///
    /// Absent and expired keys return `None`.
    pub fn get(&mut self, key: &str) -> Result<Option<S::Value>> {
        self.reap_expired()?;

        match self.store.lookup(key)? {
            Some(value) => {
                self.recency.touch(key);
                self.stats.record_hit();
                Ok(Some(value))
            }
            None => {
                self.recency.remove(key);
                self.stats.record_miss();
                Ok(None)
            }
        }
    }

    // == Set ==
    /// Stores a value, replacing any existing one for `key`.
    ///
    /// Replacing a live key never evicts. A new key first evicts as many
    /// least recently used entries as needed to stay within `max_size`.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Optional time-to-live, None or zero = never expires
    pub fn set(&mut self, key: &str, value: S::Value, ttl: Option<Duration>) -> Result<()> {
        let ttl = effective_ttl(ttl);
        self.reap_expired()?;

        let replaced = self.store.remove(key)?;
        self.recency.remove(key);

        if !replaced {
            self.evict_for(1)?;
        }

        self.insert_live(key, value, ttl)
    }

    // == Add ==
    /// Stores a value only if `key` is not already live.
    ///
    /// Fails with [`CacheError::DuplicateKey`] and leaves the cache untouched
    /// when the key exists; use [`set`](Self::set) to overwrite.
    pub fn add(&mut self, key: &str, value: S::Value, ttl: Option<Duration>) -> Result<()> {
        let ttl = effective_ttl(ttl);
        self.reap_expired()?;

        if self.store.contains(key)? {
            return Err(CacheError::DuplicateKey(key.to_string()));
        }

        self.evict_for(1)?;
        self.insert_live(key, value, ttl)
    }

    // == Delete ==
    /// Removes an entry. Returns whether it was present.
    pub fn delete(&mut self, key: &str) -> Result<bool> {
        self.reap_expired()?;

        let removed = self.store.remove(key)?;
        self.recency.remove(key);
        Ok(removed)
    }

    // == Evict ==
    /// Evicts least recently used entries until the bound holds.
    ///
    /// Returns the number of entries evicted; 0 when nothing had to go.
    pub fn evict(&mut self) -> Result<usize> {
        self.reap_expired()?;
        self.evict_for(0)
    }

    /// Changes the bound and evicts down to it straight away.
    pub fn set_max_size(&mut self, max_size: usize) -> Result<usize> {
        self.max_size = max_size;
        self.evict()
    }

    // == Exists / Peek ==
    /// Checks whether `key` is live without refreshing its recency.
    pub fn exists(&self, key: &str) -> Result<bool> {
        self.store.contains(key)
    }

    /// Reads a value without refreshing its recency or counting a hit.
    pub fn peek(&self, key: &str) -> Result<Option<S::Value>> {
        self.store.lookup(key)
    }

    // == Expire ==
    /// Replaces the TTL of a live key; `None` or zero makes it permanent.
    ///
    /// Recency is left unchanged. Returns false if the key is absent.
    pub fn expire(&mut self, key: &str, ttl: Option<Duration>) -> Result<bool> {
        self.reap_expired()?;
        self.store.expire(key, effective_ttl(ttl))
    }

    // == Batch Operations ==
    /// Gets several keys in order, touching each hit.
    pub fn multi_get<I, K>(&mut self, keys: I) -> Result<Vec<Option<S::Value>>>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        keys.into_iter().map(|key| self.get(key.as_ref())).collect()
    }

    /// Sets several pairs in order with a shared TTL.
    ///
    /// Later pairs win over earlier ones for the same key. With more pairs
    /// than `max_size`, only the last `max_size` distinct keys survive.
    pub fn multi_set<I, K>(&mut self, pairs: I, ttl: Option<Duration>) -> Result<()>
    where
        I: IntoIterator<Item = (K, S::Value)>,
        K: AsRef<str>,
    {
        for (key, value) in pairs {
            self.set(key.as_ref(), value, ttl)?;
        }
        Ok(())
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&mut self) -> Result<()> {
        self.store.clear()?;
        self.recency.clear();
        Ok(())
    }

    // == Purge Expired ==
    /// Drops every expired entry. Returns how many were removed.
    pub fn purge_expired(&mut self) -> Result<usize> {
        self.reap_expired()
    }

    // == Introspection ==
    /// Live keys, least recently used first.
    pub fn keys(&self) -> Result<Vec<String>> {
        self.live_keys(usize::MAX)
    }

    /// Up to `n` live eviction candidates, least recently used first.
    pub fn oldest(&self, n: usize) -> Result<Vec<String>> {
        self.live_keys(n)
    }

    /// Raw recency order, least recently used first.
    ///
    /// Unlike [`keys`](Self::keys) this can still list a key whose TTL ran
    /// out after the last state-changing call.
    pub fn tracked_keys(&self) -> Vec<String> {
        self.recency.iter().map(str::to_string).collect()
    }

    /// Whether `key` currently has a recency slot.
    pub fn is_tracked(&self, key: &str) -> bool {
        self.recency.contains(key)
    }

    /// Returns the current number of live entries in the cache.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.store.len());
        stats
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // == Internals ==
    fn live_keys(&self, limit: usize) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for key in self.recency.iter() {
            if keys.len() == limit {
                break;
            }
            if self.store.contains(key)? {
                keys.push(key.to_string());
            }
        }
        Ok(keys)
    }

    /// Inserts and tracks `key`. An entry the store already considers
    /// expired is reaped instead of tracked.
    fn insert_live(&mut self, key: &str, value: S::Value, ttl: Option<Duration>) -> Result<()> {
        self.store.insert(key, value, ttl)?;
        if self.store.contains(key)? {
            self.recency.touch(key);
        } else {
            self.reap_expired()?;
        }
        Ok(())
    }

    /// Mirrors store-side expiry into the tracker.
    fn reap_expired(&mut self) -> Result<usize> {
        let expired = self.store.drain_expired()?;
        for key in &expired {
            self.recency.remove(key);
        }

        if !expired.is_empty() {
            debug!("Reaped {} expired entries", expired.len());
            self.stats.record_expirations(expired.len());
        }
        Ok(expired.len())
    }

    /// Evicts enough entries that `incoming` new ones still fit the bound.
    ///
    /// The overflow is measured in live entries. A victim the store no longer
    /// holds (deleted or expired) is skipped and the next oldest key is taken
    /// instead. A store fault stops the pass with the failing
    /// victim still present in both structures.
    fn evict_for(&mut self, incoming: usize) -> Result<usize> {
        if self.max_size == 0 {
            return Ok(0);
        }

        let mut evicted = 0;
        loop {
            let overflow = (self.store.len() + incoming).saturating_sub(self.max_size);
            if overflow == 0 || self.recency.is_empty() {
                break;
            }

            for victim in self.recency.oldest(overflow) {
                if self.store.remove(&victim)? {
                    evicted += 1;
                } else {
                    debug!("Eviction victim {} already absent from store, skipping", victim);
                }
                self.recency.remove(&victim);
            }
        }

        if evicted > 0 {
            debug!(
                "Evicted {} least recently used entries (max_size={})",
                evicted, self.max_size
            );
            self.stats.record_evictions(evicted);
        }
        Ok(evicted)
    }
}

/// Zero TTLs mean "never expire".
fn effective_ttl(ttl: Option<Duration>) -> Option<Duration> {
    ttl.filter(|ttl| !ttl.is_zero())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::collections::HashSet;
    use std::thread::sleep;

    fn cache(max_size: usize) -> BoundedCache<MemoryStore<String>> {
        BoundedCache::new(MemoryStore::new(), max_size).unwrap()
    }

    fn put(cache: &mut BoundedCache<MemoryStore<String>>, key: &str) {
        cache.set(key, format!("value_{}", key), None).unwrap();
    }

    fn assert_consistent(cache: &BoundedCache<MemoryStore<String>>) {
        let stored: HashSet<String> = cache.store().keys().unwrap().into_iter().collect();
        let tracked: HashSet<String> = cache.tracked_keys().into_iter().collect();
        assert_eq!(stored, tracked, "store and tracker diverged");
    }

    #[test]
    fn test_cache_set_and_get() {
        let mut cache = cache(10);

        cache.set("key1", "value1".to_string(), None).unwrap();

        assert_eq!(cache.get("key1").unwrap(), Some("value1".to_string()));
        assert_eq!(cache.len(), 1);
        assert_consistent(&cache);
    }

    #[test]
    fn test_cache_get_nonexistent() {
        let mut cache = cache(10);
        assert_eq!(cache.get("nonexistent").unwrap(), None);
    }

    #[test]
    fn test_oldest_evicted_first() {
        let mut cache = cache(2);

        put(&mut cache, "A");
        put(&mut cache, "B");
        put(&mut cache, "C");

        assert_eq!(cache.keys().unwrap(), vec!["B".to_string(), "C".to_string()]);
        assert_eq!(cache.get("A").unwrap(), None);
        assert_eq!(cache.stats().evictions, 1);
        assert_consistent(&cache);
    }

    #[test]
    fn test_get_refreshes_recency() {
        let mut cache = cache(2);

        put(&mut cache, "A");
        put(&mut cache, "B");
        cache.get("A").unwrap();
        put(&mut cache, "C");

        assert!(cache.exists("A").unwrap());
        assert!(!cache.exists("B").unwrap());
        assert!(cache.exists("C").unwrap());
    }

    #[test]
    fn test_overwrite_does_not_evict() {
        let mut cache = cache(1);

        cache.set("A", "old".to_string(), None).unwrap();
        cache.set("A", "new".to_string(), None).unwrap();

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().evictions, 0);
        assert_eq!(cache.get("A").unwrap(), Some("new".to_string()));
    }

    #[test]
    fn test_overwrite_refreshes_recency() {
        let mut cache = cache(2);

        put(&mut cache, "A");
        put(&mut cache, "B");
        put(&mut cache, "A");
        put(&mut cache, "C");

        assert_eq!(cache.keys().unwrap(), vec!["A".to_string(), "C".to_string()]);
    }

    #[test]
    fn test_add_duplicate_fails_cleanly() {
        let mut cache = cache(10);

        cache.add("A", "v1".to_string(), None).unwrap();
        let result = cache.add("A", "v2".to_string(), None);

        assert!(matches!(result, Err(CacheError::DuplicateKey(ref key)) if key == "A"));
        assert_eq!(cache.get("A").unwrap(), Some("v1".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_add_duplicate_keeps_recency() {
        let mut cache = cache(2);

        put(&mut cache, "A");
        put(&mut cache, "B");
        assert!(cache.add("A", "again".to_string(), None).is_err());
        put(&mut cache, "C");

        // The failed add must not have refreshed A
        assert!(!cache.exists("A").unwrap());
        assert!(cache.exists("B").unwrap());
    }

    #[test]
    fn test_add_evicts_when_full() {
        let mut cache = cache(2);

        cache.add("A", "a".to_string(), None).unwrap();
        cache.add("B", "b".to_string(), None).unwrap();
        cache.add("C", "c".to_string(), None).unwrap();

        assert_eq!(cache.keys().unwrap(), vec!["B".to_string(), "C".to_string()]);
        assert_consistent(&cache);
    }

    #[test]
    fn test_add_over_expired_key() {
        let mut cache = cache(10);

        cache
            .set("A", "short".to_string(), Some(Duration::from_millis(50)))
            .unwrap();
        sleep(Duration::from_millis(80));

        cache.add("A", "fresh".to_string(), None).unwrap();
        assert_eq!(cache.get("A").unwrap(), Some("fresh".to_string()));
    }

    #[test]
    fn test_delete_idempotent() {
        let mut cache = cache(10);

        put(&mut cache, "A");

        assert!(cache.delete("A").unwrap());
        assert!(!cache.delete("A").unwrap());
        assert!(!cache.delete("never").unwrap());
        assert!(!cache.is_tracked("A"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_evict_is_noop_within_bound() {
        let mut cache = cache(3);

        put(&mut cache, "A");
        put(&mut cache, "B");

        assert_eq!(cache.evict().unwrap(), 0);
        assert_eq!(cache.evict().unwrap(), 0);
        assert_eq!(cache.keys().unwrap(), vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_shrinking_bound_evicts_whole_overflow() {
        let mut cache = cache(5);

        for key in ["A", "B", "C", "D", "E"] {
            put(&mut cache, key);
        }
        cache.get("A").unwrap();

        assert_eq!(cache.set_max_size(2).unwrap(), 3);
        assert_eq!(cache.keys().unwrap(), vec!["E".to_string(), "A".to_string()]);
        assert_consistent(&cache);
    }

    #[test]
    fn test_vanished_victim_is_skipped() {
        let mut cache = cache(3);

        put(&mut cache, "A");
        put(&mut cache, "B");
        put(&mut cache, "C");

        // A disappears behind the cache's back
        cache.store.remove("A").unwrap();

        assert_eq!(cache.set_max_size(1).unwrap(), 1);
        assert_eq!(cache.keys().unwrap(), vec!["C".to_string()]);
        assert_consistent(&cache);
    }

    #[test]
    fn test_unbounded_mode_never_evicts() {
        let mut cache: BoundedCache<MemoryStore<usize>> =
            BoundedCache::new(MemoryStore::new(), 0).unwrap();

        for i in 0..100_000 {
            cache.set(&format!("key{}", i), i, None).unwrap();
        }

        assert_eq!(cache.len(), 100_000);
        assert_eq!(cache.evict().unwrap(), 0);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_expired_keys_leave_tracker() {
        let mut cache = cache(10);

        cache
            .set("short", "v".to_string(), Some(Duration::from_millis(50)))
            .unwrap();
        put(&mut cache, "long");
        assert!(cache.is_tracked("short"));

        sleep(Duration::from_millis(80));

        assert_eq!(cache.get("long").unwrap(), Some("value_long".to_string()));
        assert!(!cache.is_tracked("short"));
        assert_eq!(cache.stats().expirations, 1);
        assert_consistent(&cache);
    }

    #[test]
    fn test_expired_keys_free_capacity() {
        let mut cache = cache(2);

        cache
            .set("A", "a".to_string(), Some(Duration::from_millis(50)))
            .unwrap();
        put(&mut cache, "B");
        sleep(Duration::from_millis(80));
        put(&mut cache, "C");

        // A expired, so B did not need to go
        assert_eq!(cache.keys().unwrap(), vec!["B".to_string(), "C".to_string()]);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_zero_ttl_never_expires() {
        let mut cache = cache(1);

        put(&mut cache, "live");
        cache.set("kept", "v".to_string(), Some(Duration::ZERO)).unwrap();

        assert_eq!(cache.keys().unwrap(), vec!["kept".to_string()]);
        assert_eq!(cache.get("kept").unwrap(), Some("v".to_string()));
        assert_eq!(cache.store().ttl_remaining("kept"), None);
        assert_consistent(&cache);

        cache.add("other", "o".to_string(), Some(Duration::ZERO)).unwrap();
        assert_eq!(cache.keys().unwrap(), vec!["other".to_string()]);
        assert_consistent(&cache);
    }

    #[test]
    fn test_expire_with_zero_ttl_makes_permanent() {
        let mut cache = cache(10);

        cache
            .set("A", "a".to_string(), Some(Duration::from_millis(50)))
            .unwrap();
        assert!(cache.expire("A", Some(Duration::ZERO)).unwrap());

        sleep(Duration::from_millis(80));

        assert_eq!(cache.purge_expired().unwrap(), 0);
        assert_eq!(cache.get("A").unwrap(), Some("a".to_string()));
    }

    #[test]
    fn test_queries_hide_expired_keys() {
        let mut cache = cache(10);

        cache
            .set("A", "a".to_string(), Some(Duration::from_millis(20)))
            .unwrap();
        sleep(Duration::from_millis(50));

        // Nothing has reaped A yet, but no query reports it
        assert!(cache.is_tracked("A"));
        assert!(!cache.exists("A").unwrap());
        assert!(cache.keys().unwrap().is_empty());
        assert!(cache.oldest(1).unwrap().is_empty());
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.stats().total_entries, 0);

        put(&mut cache, "B");
        assert!(!cache.is_tracked("A"));
        assert_consistent(&cache);
    }

    #[test]
    fn test_oldest_skips_expired_candidates() {
        let mut cache = cache(10);

        cache
            .set("A", "a".to_string(), Some(Duration::from_millis(20)))
            .unwrap();
        put(&mut cache, "B");
        put(&mut cache, "C");
        sleep(Duration::from_millis(50));

        assert_eq!(cache.oldest(1).unwrap(), vec!["B".to_string()]);
        assert_eq!(cache.tracked_keys().len(), 3);
    }

    #[test]
    fn test_undrained_expiry_does_not_cost_live_keys() {
        let mut cache = cache(2);

        cache
            .set("A", "a".to_string(), Some(Duration::from_millis(20)))
            .unwrap();
        put(&mut cache, "B");
        sleep(Duration::from_millis(50));

        // Straight to the eviction pass, skipping the reap
        assert_eq!(cache.evict_for(1).unwrap(), 0);
        assert!(cache.exists("B").unwrap());
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_exists_and_peek_do_not_touch() {
        let mut cache = cache(2);

        put(&mut cache, "A");
        put(&mut cache, "B");
        assert!(cache.exists("A").unwrap());
        assert_eq!(cache.peek("A").unwrap(), Some("value_A".to_string()));
        put(&mut cache, "C");

        assert!(!cache.exists("A").unwrap());
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn test_expire_changes_ttl_only() {
        let mut cache = cache(10);

        put(&mut cache, "A");
        put(&mut cache, "B");

        assert!(cache.expire("A", Some(Duration::from_millis(50))).unwrap());
        assert!(!cache.expire("missing", None).unwrap());
        assert_eq!(cache.keys().unwrap(), vec!["A".to_string(), "B".to_string()]);

        sleep(Duration::from_millis(80));

        assert_eq!(cache.purge_expired().unwrap(), 1);
        assert_eq!(cache.keys().unwrap(), vec!["B".to_string()]);
    }

    #[test]
    fn test_multi_get_and_multi_set() {
        let mut cache = cache(3);

        cache
            .multi_set(
                vec![("a", "1".to_string()), ("b", "2".to_string()), ("c", "3".to_string())],
                None,
            )
            .unwrap();

        let values = cache.multi_get(["c", "missing", "a"]).unwrap();
        assert_eq!(
            values,
            vec![Some("3".to_string()), None, Some("1".to_string())]
        );
        assert_eq!(cache.oldest(1).unwrap(), vec!["b".to_string()]);
    }

    #[test]
    fn test_multi_set_respects_bound() {
        let mut cache = cache(2);

        let pairs = (0..5).map(|i| (format!("k{}", i), i.to_string()));
        cache.multi_set(pairs, None).unwrap();

        assert_eq!(cache.keys().unwrap(), vec!["k3".to_string(), "k4".to_string()]);
    }

    #[test]
    fn test_clear() {
        let mut cache = cache(10);

        put(&mut cache, "A");
        put(&mut cache, "B");
        cache.clear().unwrap();

        assert!(cache.is_empty());
        assert!(cache.keys().unwrap().is_empty());
        assert_eq!(cache.get("A").unwrap(), None);
    }

    #[test]
    fn test_new_adopts_and_trims_existing_entries() {
        let mut store = MemoryStore::new();
        for key in ["a", "b", "c", "d"] {
            store.insert(key, key.to_string(), None).unwrap();
        }

        let cache = BoundedCache::new(store, 2).unwrap();

        assert_eq!(cache.len(), 2);
        assert_consistent(&cache);
    }

    #[test]
    fn test_from_config() {
        let config = Config::default().with_max_size(Some(7)).unwrap();
        let cache: BoundedCache<MemoryStore<String>> =
            BoundedCache::from_config(MemoryStore::new(), &config).unwrap();
        assert_eq!(cache.max_size(), 7);
    }

    #[test]
    fn test_stats_track_hits_and_misses() {
        let mut cache = cache(10);

        put(&mut cache, "A");
        cache.get("A").unwrap();
        cache.get("nope").unwrap();

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    // == Store Fault Propagation ==

    /// Memory store whose writes can be switched to fail.
    #[derive(Default)]
    struct BrokenStore {
        inner: MemoryStore<String>,
        fail_writes: bool,
    }

    impl BrokenStore {
        fn fault() -> CacheError {
            CacheError::store(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "backend unreachable",
            ))
        }
    }

    impl KeyValueStore for BrokenStore {
        type Value = String;

        fn lookup(&self, key: &str) -> Result<Option<String>> {
            self.inner.lookup(key)
        }

        fn insert(&mut self, key: &str, value: String, ttl: Option<Duration>) -> Result<()> {
            if self.fail_writes {
                return Err(Self::fault());
            }
            self.inner.insert(key, value, ttl)
        }

        fn remove(&mut self, key: &str) -> Result<bool> {
            if self.fail_writes {
                return Err(Self::fault());
            }
            self.inner.remove(key)
        }

        fn contains(&self, key: &str) -> Result<bool> {
            self.inner.contains(key)
        }

        fn keys(&self) -> Result<Vec<String>> {
            self.inner.keys()
        }

        fn len(&self) -> usize {
            self.inner.len()
        }

        fn expire(&mut self, key: &str, ttl: Option<Duration>) -> Result<bool> {
            self.inner.expire(key, ttl)
        }

        fn drain_expired(&mut self) -> Result<Vec<String>> {
            self.inner.drain_expired()
        }

        fn clear(&mut self) -> Result<()> {
            self.inner.clear()
        }
    }

    #[test]
    fn test_store_faults_propagate() {
        let mut cache = BoundedCache::new(BrokenStore::default(), 1).unwrap();
        cache.set("A", "a".to_string(), None).unwrap();

        cache.store.fail_writes = true;

        assert!(matches!(cache.set("B", "b".to_string(), None), Err(CacheError::Store(_))));
        assert!(matches!(cache.delete("A"), Err(CacheError::Store(_))));

        // The failed calls left A in both structures
        assert!(cache.is_tracked("A"));
        assert_eq!(cache.get("A").unwrap(), Some("a".to_string()));
    }
}
