//! Shared Cache Module
//!
//! Thread-safe handle around a [`BoundedCache`].

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::{RwLock, RwLockReadGuard};

use crate::cache::{BoundedCache, CacheStats};
use crate::config::Config;
use crate::error::Result;
use crate::store::KeyValueStore;

// == Shared Cache ==
/// Cloneable handle to one cache instance.
///
/// The store and the recency tracker sit behind a single `RwLock`, so a
/// mutation updates both or neither before any other caller looks. `get`
/// takes the write lock because a hit reorders the tracker; pure queries
/// take the read lock.
#[derive(Debug)]
pub struct SharedCache<S> {
    inner: Arc<RwLock<BoundedCache<S>>>,
}

impl<S> Clone for SharedCache<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: KeyValueStore> SharedCache<S> {
    // == Constructors ==
    /// Wraps an existing cache.
    pub fn new(cache: BoundedCache<S>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cache)),
        }
    }

    /// Builds a cache over `store` bounded to `max_size` entries.
    pub fn with_store(store: S, max_size: usize) -> Result<Self> {
        BoundedCache::new(store, max_size).map(Self::new)
    }

    /// Builds a cache over `store` using the bound from `config`.
    pub fn from_config(store: S, config: &Config) -> Result<Self> {
        BoundedCache::from_config(store, config).map(Self::new)
    }

    // == Mutating Operations ==
    pub async fn get(&self, key: &str) -> Result<Option<S::Value>> {
        self.inner.write().await.get(key)
    }

    pub async fn set(&self, key: &str, value: S::Value, ttl: Option<Duration>) -> Result<()> {
        self.inner.write().await.set(key, value, ttl)
    }

    pub async fn add(&self, key: &str, value: S::Value, ttl: Option<Duration>) -> Result<()> {
        self.inner.write().await.add(key, value, ttl)
    }

    pub async fn delete(&self, key: &str) -> Result<bool> {
        self.inner.write().await.delete(key)
    }

    pub async fn evict(&self) -> Result<usize> {
        self.inner.write().await.evict()
    }

    pub async fn set_max_size(&self, max_size: usize) -> Result<usize> {
        self.inner.write().await.set_max_size(max_size)
    }

    pub async fn expire(&self, key: &str, ttl: Option<Duration>) -> Result<bool> {
        self.inner.write().await.expire(key, ttl)
    }

    /// Gets several keys under one lock acquisition.
    pub async fn multi_get<I, K>(&self, keys: I) -> Result<Vec<Option<S::Value>>>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        self.inner.write().await.multi_get(keys)
    }

    /// Sets several pairs under one lock acquisition.
    pub async fn multi_set<I, K>(&self, pairs: I, ttl: Option<Duration>) -> Result<()>
    where
        I: IntoIterator<Item = (K, S::Value)>,
        K: AsRef<str>,
    {
        self.inner.write().await.multi_set(pairs, ttl)
    }

    pub async fn clear(&self) -> Result<()> {
        self.inner.write().await.clear()
    }

    pub async fn purge_expired(&self) -> Result<usize> {
        self.inner.write().await.purge_expired()
    }

    // == Read-only Queries ==
    pub async fn exists(&self, key: &str) -> Result<bool> {
        self.inner.read().await.exists(key)
    }

    pub async fn peek(&self, key: &str) -> Result<Option<S::Value>> {
        self.inner.read().await.peek(key)
    }

    /// Live keys, least recently used first.
    pub async fn keys(&self) -> Result<Vec<String>> {
        self.inner.read().await.keys()
    }

    pub async fn oldest(&self, n: usize) -> Result<Vec<String>> {
        self.inner.read().await.oldest(n)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    pub async fn max_size(&self) -> usize {
        self.inner.read().await.max_size()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }

    /// Holds the read lock for several queries against one consistent state.
    pub async fn read(&self) -> RwLockReadGuard<'_, BoundedCache<S>> {
        self.inner.read().await
    }

    /// Weak reference for background tasks that must not keep the cache alive.
    pub(crate) fn downgrade(&self) -> Weak<RwLock<BoundedCache<S>>> {
        Arc::downgrade(&self.inner)
    }
}
