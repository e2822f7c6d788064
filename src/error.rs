//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

/// Boxed error raised by a key-value store implementation.
pub type StoreFault = Box<dyn std::error::Error + Send + Sync + 'static>;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// `add` was called for a key that is already live
    #[error("Key {0} already exists, use set to update the value")]
    DuplicateKey(String),

    /// Configuration value could not be accepted
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Fault reported by the underlying key-value store
    #[error("Store error: {0}")]
    Store(#[source] StoreFault),
}

impl CacheError {
    /// Wraps an arbitrary store-side error.
    pub fn store<E>(err: E) -> Self
    where
        E: Into<StoreFault>,
    {
        CacheError::Store(err.into())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
