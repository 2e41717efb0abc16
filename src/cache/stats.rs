//! Cache Statistics Module
//!
//! Tracks cache performance counters and builds the public statistics
//! snapshot.

use serde::Serialize;

use crate::cache::EvictionStrategy;
use crate::config::CacheConfig;

// == Cache Stats ==
/// Monotonically accumulating performance counters.
///
/// Counters are scoped to one cache instance and reset only by an explicit
/// `reset`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of lookups that found a live entry
    pub hits: u64,
    /// Number of lookups that found nothing
    pub misses: u64,
    /// Number of entries removed by TTL expiry or capacity eviction
    pub evictions: u64,
    /// Total number of lookups
    pub total_gets: u64,
    /// Total number of insertions (including overwrites)
    pub total_sets: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the hit rate as hits / total_gets, or 0.0 before the
    /// first lookup.
    pub fn hit_rate(&self) -> f64 {
        if self.total_gets == 0 {
            0.0
        } else {
            self.hits as f64 / self.total_gets as f64
        }
    }

    /// Formats the hit rate as a percentage, e.g. `"70.00%"`.
    ///
    /// Before the first lookup this is `"0%"`.
    pub fn hit_rate_display(&self) -> String {
        if self.total_gets == 0 {
            "0%".to_string()
        } else {
            format!("{:.2}%", self.hit_rate() * 100.0)
        }
    }

    // == Recorders ==
    /// Counts a lookup, before it resolves to a hit or a miss.
    pub fn record_get(&mut self) {
        self.total_gets += 1;
    }

    /// Counts an insertion.
    pub fn record_set(&mut self) {
        self.total_sets += 1;
    }

    /// Counts a successful lookup.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Counts a failed lookup.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Counts a removal by expiry or capacity eviction.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Reset ==
    /// Zeroes all counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// == Stats Snapshot ==
/// Point-in-time statistics view returned by `ExpiringCache::statistics`.
///
/// Combines the raw counters with the derived hit rate and the cache's
/// current size and configuration.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub total_gets: u64,
    pub total_sets: u64,
    /// Hit rate formatted as a percentage
    pub hit_rate: String,
    /// Current number of stored entries
    pub size: usize,
    pub eviction_strategy: EvictionStrategy,
    pub default_ttl_ms: u64,
    pub max_size: Option<usize>,
}

impl StatsSnapshot {
    /// Builds a snapshot from the live counters, entry count, and
    /// configuration.
    pub fn new(stats: &CacheStats, size: usize, config: &CacheConfig) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            total_gets: stats.total_gets,
            total_sets: stats.total_sets,
            hit_rate: stats.hit_rate_display(),
            size,
            eviction_strategy: config.eviction_strategy,
            default_ttl_ms: config.default_ttl_ms,
            max_size: config.max_size,
        }
    }
}
