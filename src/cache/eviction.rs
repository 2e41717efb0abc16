//! Eviction Strategy Module
//!
//! Defines the closed set of capacity-eviction strategies and victim
//! selection over the cache's entries.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::cache::CacheEntry;

// == Eviction Strategy ==
/// Capacity-eviction strategy, selected when the cache is full and a new
/// key is inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EvictionStrategy {
    /// Evicts the entry with the oldest `last_accessed` timestamp
    #[default]
    Lru,
    /// Evicts the entry with the oldest `created_at` timestamp
    Fifo,
    /// Evicts the entry with the lowest `access_count`
    Lfu,
}

impl EvictionStrategy {
    /// Canonical name, as carried in eviction events and statistics.
    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionStrategy::Lru => "LRU",
            EvictionStrategy::Fifo => "FIFO",
            EvictionStrategy::Lfu => "LFU",
        }
    }
}

impl fmt::Display for EvictionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Unknown Strategy Error ==
/// Returned when parsing a strategy name that is not LRU, FIFO, or LFU.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown eviction strategy: {0}")]
pub struct UnknownStrategy(pub String);

impl FromStr for EvictionStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LRU" => Ok(EvictionStrategy::Lru),
            "FIFO" => Ok(EvictionStrategy::Fifo),
            "LFU" => Ok(EvictionStrategy::Lfu),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

// == Victim Selection ==
/// Selects the key to evict under `strategy`.
///
/// `entries` must iterate in insertion order; the scan keeps the first key
/// with the strictly smallest metric, so ties resolve to the
/// earliest-inserted entry.
pub fn select_victim<'a, V>(
    strategy: EvictionStrategy,
    entries: impl Iterator<Item = (&'a str, &'a CacheEntry<V>)>,
) -> Option<String>
where
    V: 'a,
{
    let metric = |entry: &CacheEntry<V>| match strategy {
        EvictionStrategy::Lru => entry.last_accessed,
        EvictionStrategy::Fifo => entry.created_at,
        EvictionStrategy::Lfu => entry.access_count,
    };

    let mut victim: Option<(&str, u64)> = None;
    for (key, entry) in entries {
        let m = metric(entry);
        match victim {
            Some((_, best)) if m >= best => {}
            _ => victim = Some((key, m)),
        }
    }
    victim.map(|(key, _)| key.to_string())
}
