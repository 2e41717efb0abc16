//! Configuration Module
//!
//! Cache configuration: eviction strategy, default TTL, and capacity.
//! Loaded from the environment or supplied directly, and adjustable at
//! runtime through partial updates that never fail: invalid values are
//! logged and ignored.

use std::env;

use serde::Deserialize;
use tracing::{info, warn};

use crate::cache::EvictionStrategy;

/// Default TTL applied when `set` omits an explicit one: 5 minutes.
pub const DEFAULT_TTL_MS: u64 = 300_000;

// == Cache Config ==
/// Cache configuration parameters.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Strategy used when capacity eviction is required
    pub eviction_strategy: EvictionStrategy,
    /// TTL in milliseconds for entries stored without an explicit TTL
    pub default_ttl_ms: u64,
    /// Maximum number of entries; None means unbounded
    pub max_size: Option<usize>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            eviction_strategy: EvictionStrategy::default(),
            default_ttl_ms: DEFAULT_TTL_MS,
            max_size: None,
        }
    }
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment
    /// variables.
    ///
    /// # Environment Variables
    /// - `CACHE_EVICTION_STRATEGY` - LRU, FIFO, or LFU (default: LRU)
    /// - `CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 300000)
    /// - `CACHE_MAX_SIZE` - Maximum entry count (default: unbounded)
    ///
    /// Unparseable or out-of-range values fall back to the default with a
    /// warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply(ConfigUpdate {
            eviction_strategy: env::var("CACHE_EVICTION_STRATEGY").ok(),
            default_ttl_ms: env::var("CACHE_DEFAULT_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok()),
            max_size: env::var("CACHE_MAX_SIZE").ok().and_then(|v| v.parse().ok()),
        });
        config
    }

    // == Apply ==
    /// Applies a partial update.
    ///
    /// Unknown strategy names, a zero TTL, and a zero size are rejected
    /// with a warning while the previous value is retained. Never fails.
    pub fn apply(&mut self, update: ConfigUpdate) {
        if let Some(name) = update.eviction_strategy {
            match name.parse::<EvictionStrategy>() {
                Ok(strategy) => {
                    self.eviction_strategy = strategy;
                    info!(strategy = %strategy, "eviction strategy changed");
                }
                Err(err) => warn!(%err, "ignoring eviction strategy update"),
            }
        }

        if let Some(ttl_ms) = update.default_ttl_ms {
            if ttl_ms == 0 {
                warn!("ignoring default TTL update: TTL must be positive");
            } else {
                self.default_ttl_ms = ttl_ms;
                info!(ttl_ms, "default TTL changed");
            }
        }

        if let Some(max_size) = update.max_size {
            if max_size == 0 {
                warn!("ignoring max size update: size must be positive");
            } else {
                self.max_size = Some(max_size);
                info!(max_size, "max cache size changed");
            }
        }
    }
}

// == Config Update ==
/// Partial configuration update for a running cache.
///
/// The strategy travels as a name string so that hosts can pass
/// configuration through from files or JSON without pre-validating it;
/// unrecognized names are ignored at apply time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigUpdate {
    #[serde(default)]
    pub eviction_strategy: Option<String>,
    #[serde(default)]
    pub default_ttl_ms: Option<u64>,
    #[serde(default)]
    pub max_size: Option<usize>,
}
