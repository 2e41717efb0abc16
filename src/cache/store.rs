//! Cache Store Module
//!
//! The cache engine: HashMap storage with TTL expiry, pluggable capacity
//! eviction, statistics, and lifecycle events published through an owned
//! event channel.

use std::collections::{BTreeMap, HashMap};

use crate::cache::{
    eviction, CacheEntry, CacheEvent, CacheStats, EntryDebug, EvictionReason, InsertionOrder,
    StatsSnapshot, MAX_KEY_LENGTH,
};
use crate::clock::{Clock, SystemClock};
use crate::config::{CacheConfig, ConfigUpdate};
use crate::error::{CacheError, Result};
use crate::events::EventChannel;

// == Expiring Cache ==
/// Bounded key/value store with per-entry TTL and pluggable eviction.
///
/// Every mutating or querying operation first reconciles expired entries,
/// then acts, then publishes a lifecycle event on the owned channel, so
/// external observers see expiry as if it were eager.
///
/// The cache is single-threaded: operations run to completion once invoked.
/// Multi-threaded hosts wrap the whole cache in one mutex (see
/// `tasks::spawn_sweep_task`).
#[derive(Debug)]
pub struct ExpiringCache<V, C = SystemClock> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Key insertion order, for `keys()` and eviction tie-breaks
    order: InsertionOrder,
    /// Performance counters
    stats: CacheStats,
    /// Runtime configuration
    config: CacheConfig,
    /// Lifecycle event channel
    events: EventChannel<CacheEvent<V>>,
    /// Injected monotonic clock
    clock: C,
}

impl<V: Clone> ExpiringCache<V> {
    // == Constructor ==
    /// Creates a cache with the given configuration and the system clock.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<V: Clone, C: Clock> ExpiringCache<V, C> {
    /// Creates a cache with an explicit clock, for deterministic TTL tests.
    pub fn with_clock(config: CacheConfig, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(),
            config,
            events: EventChannel::new(),
            clock,
        }
    }

    // == Events ==
    /// The cache's lifecycle event channel.
    pub fn events(&self) -> &EventChannel<CacheEvent<V>> {
        &self.events
    }

    /// Mutable access to the event channel, for subscribing observers.
    pub fn events_mut(&mut self) -> &mut EventChannel<CacheEvent<V>> {
        &mut self.events
    }

    // == Configuration ==
    /// The current configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Applies a partial configuration update.
    ///
    /// Invalid values are logged and ignored; this never fails and never
    /// touches stored entries.
    pub fn configure(&mut self, update: ConfigUpdate) {
        self.config.apply(update);
    }

    // == Set ==
    /// Stores `value` under `key` with the given TTL, or the configured
    /// default when `ttl_ms` is `None`.
    ///
    /// Expired entries are reconciled first. Inserting a new key into a
    /// full cache evicts exactly one entry per the active strategy;
    /// overwriting an existing key never evicts. The entry's creation and
    /// access metadata are reset on overwrite.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl_ms: Option<u64>) -> Result<()> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(CacheError::InvalidKey(
                "key must be a non-empty string".to_string(),
            ));
        }
        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::InvalidKey(format!(
                "key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }

        self.sweep_expired();

        let is_overwrite = self.entries.contains_key(&key);
        if !is_overwrite {
            if let Some(max_size) = self.config.max_size {
                if self.entries.len() >= max_size {
                    self.evict_for_capacity();
                }
            }
        }

        let now = self.clock.now_ms();
        let ttl_ms = ttl_ms.unwrap_or(self.config.default_ttl_ms);
        self.entries
            .insert(key.clone(), CacheEntry::new(value.clone(), ttl_ms, now));
        self.order.record(&key);
        self.stats.record_set();

        self.publish(CacheEvent::Set { key, value, ttl_ms });
        Ok(())
    }

    // == Get ==
    /// Looks up `key`, returning the value if present and live.
    ///
    /// Counts toward `total_gets` and then toward `hits` or `misses`; a hit
    /// refreshes the entry's `last_accessed` and `access_count`. `None` is
    /// the unambiguous not-found result.
    pub fn get(&mut self, key: &str) -> Option<V> {
        self.stats.record_get();
        self.sweep_expired();

        let now = self.clock.now_ms();
        if let Some(entry) = self.entries.get_mut(key) {
            entry.touch(now);
            let value = entry.value.clone();
            self.stats.record_hit();
            self.publish(CacheEvent::Hit {
                key: key.to_string(),
                value: value.clone(),
            });
            Some(value)
        } else {
            self.stats.record_miss();
            self.publish(CacheEvent::Miss {
                key: key.to_string(),
            });
            None
        }
    }

    // == Has ==
    /// Checks whether `key` holds a live entry.
    ///
    /// Reconciles expired entries but is otherwise a pure observer: no
    /// statistics, no access metadata.
    pub fn has(&mut self, key: &str) -> bool {
        self.sweep_expired();
        self.entries.contains_key(key)
    }

    // == Delete ==
    /// Removes `key`, returning whether an entry was removed.
    ///
    /// Publishes `cache:delete` only when a removal actually occurred.
    pub fn delete(&mut self, key: &str) -> bool {
        match self.entries.remove(key) {
            Some(entry) => {
                self.order.remove(key);
                self.publish(CacheEvent::Delete {
                    key: key.to_string(),
                    value: entry.value,
                });
                true
            }
            None => false,
        }
    }

    // == Clear ==
    /// Removes all entries, publishing the previous size.
    ///
    /// Statistics are not reset; use `reset_statistics` for that.
    pub fn clear(&mut self) {
        let previous_size = self.entries.len();
        self.entries.clear();
        self.order.clear();
        self.publish(CacheEvent::Clear { previous_size });
    }

    // == Sweep Expired ==
    /// Removes every expired entry, publishing `cache:eviction` per entry
    /// and one `cache:cleanup` when anything was removed. Returns the
    /// number of entries removed.
    ///
    /// Runs automatically at the start of `set`, `get`, and `has`; also the
    /// entry point for the background sweep task.
    pub fn sweep_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let entries = &self.entries;
        let expired: Vec<String> = self
            .order
            .iter()
            .filter(|key| {
                entries
                    .get(key.as_str())
                    .map_or(false, |entry| entry.is_expired(now))
            })
            .cloned()
            .collect();

        for key in &expired {
            if let Some(entry) = self.entries.remove(key) {
                self.order.remove(key);
                self.stats.record_eviction();
                self.publish(CacheEvent::Eviction {
                    key: key.clone(),
                    reason: EvictionReason::Expired,
                    value: entry.value,
                });
            }
        }

        if !expired.is_empty() {
            self.publish(CacheEvent::Cleanup {
                removed: expired.len(),
            });
        }

        expired.len()
    }

    // == Capacity Eviction ==
    /// Evicts the entry chosen by the active strategy.
    fn evict_for_capacity(&mut self) {
        let strategy = self.config.eviction_strategy;
        let entries = &self.entries;
        let ordered = self
            .order
            .iter()
            .filter_map(|key| entries.get(key.as_str()).map(|entry| (key.as_str(), entry)));

        let Some(key) = eviction::select_victim(strategy, ordered) else {
            return;
        };
        if let Some(entry) = self.entries.remove(&key) {
            self.order.remove(&key);
            self.stats.record_eviction();
            self.publish(CacheEvent::Eviction {
                key,
                reason: EvictionReason::Capacity(strategy),
                value: entry.value,
            });
        }
    }

    // == Statistics ==
    /// Point-in-time statistics snapshot, including the formatted hit rate
    /// and current configuration.
    pub fn statistics(&self) -> StatsSnapshot {
        StatsSnapshot::new(&self.stats, self.entries.len(), &self.config)
    }

    /// Zeroes all statistics counters. Stored entries are untouched.
    pub fn reset_statistics(&mut self) {
        self.stats.reset();
    }

    // == Keys ==
    /// Live keys in insertion order. A snapshot, not a live view.
    pub fn keys(&self) -> Vec<String> {
        let now = self.clock.now_ms();
        self.order
            .iter()
            .filter(|key| {
                self.entries
                    .get(key.as_str())
                    .map_or(false, |entry| !entry.is_expired(now))
            })
            .cloned()
            .collect()
    }

    // == Debug ==
    /// Per-key diagnostic view of every stored entry, expired or not.
    pub fn debug_entries(&self) -> BTreeMap<String, EntryDebug<V>> {
        let now = self.clock.now_ms();
        self.entries
            .iter()
            .map(|(key, entry)| (key.clone(), entry.debug_view(now)))
            .collect()
    }

    // == Length ==
    /// Current number of stored entries, including not-yet-reconciled
    /// expired ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn publish(&mut self, event: CacheEvent<V>) {
        self.events.publish(event.topic(), &event);
    }
}
