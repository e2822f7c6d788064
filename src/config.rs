//! Configuration Module
//!
//! Resolves cache configuration from explicit arguments, environment
//! variables and built-in defaults, in that order of precedence.

use std::env;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Default maximum number of live entries.
pub const DEFAULT_MAX_SIZE: usize = 10_000;

/// Default interval between expiry sweeps, in seconds.
pub const DEFAULT_CLEANUP_INTERVAL: u64 = 1;

/// Environment variable holding the maximum number of entries.
pub const MAX_SIZE_VAR: &str = "CACHE_MAX_SIZE";

/// Environment variable holding the expiry sweep interval in seconds.
pub const CLEANUP_INTERVAL_VAR: &str = "CACHE_CLEANUP_INTERVAL";

/// Cache configuration parameters.
///
/// `max_size == 0` means the cache never evicts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of live entries, 0 = unbounded
    pub max_size: usize,
    /// Background expiry sweep interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_SIZE` - Maximum live entries (default: 10000, 0 = unbounded)
    /// - `CACHE_CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 1)
    ///
    /// Unset variables fall back to defaults; malformed ones are an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Creates a Config from an arbitrary named-value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_size = resolve_max_size(None, lookup(MAX_SIZE_VAR).as_deref())?;

        let cleanup_interval = match lookup(CLEANUP_INTERVAL_VAR) {
            Some(raw) => parse_interval(&raw)?,
            None => DEFAULT_CLEANUP_INTERVAL,
        };

        Ok(Self {
            max_size,
            cleanup_interval,
        })
    }

    /// Returns a copy with `max_size` overridden when an explicit value is given.
    ///
    /// Negative explicit values are rejected, matching the parsing rules for
    /// configured values.
    pub fn with_max_size(mut self, explicit: Option<i64>) -> Result<Self> {
        if let Some(value) = explicit {
            self.max_size = checked_max_size(value)?;
        }
        Ok(self)
    }

    /// Sweep interval as a `Duration`, ready for `spawn_cleanup_task`.
    pub fn cleanup_period(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
        }
    }
}

// == Layered Resolution ==
/// Resolves `max_size` as: explicit argument > configured value > default.
///
/// # Arguments
/// * `explicit` - Value passed directly by the caller
/// * `configured` - Raw value from a named configuration source
pub fn resolve_max_size(explicit: Option<i64>, configured: Option<&str>) -> Result<usize> {
    match (explicit, configured) {
        (Some(value), _) => checked_max_size(value),
        (None, Some(raw)) => parse_max_size(raw),
        (None, None) => Ok(DEFAULT_MAX_SIZE),
    }
}

fn parse_max_size(raw: &str) -> Result<usize> {
    let value: i64 = raw.trim().parse().map_err(|_| {
        CacheError::InvalidConfig(format!("{} must be an integer, got {:?}", MAX_SIZE_VAR, raw))
    })?;
    checked_max_size(value)
}

fn checked_max_size(value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| {
        CacheError::InvalidConfig(format!(
            "max_size must be non-negative (0 disables eviction), got {}",
            value
        ))
    })
}

fn parse_interval(raw: &str) -> Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(CacheError::InvalidConfig(format!(
            "{} must be a positive number of seconds, got {:?}",
            CLEANUP_INTERVAL_VAR, raw
        ))),
        Ok(secs) => Ok(secs),
    }
}
