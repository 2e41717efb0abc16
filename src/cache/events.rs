//! Cache Lifecycle Events
//!
//! Typed payloads published by the cache through its event channel, plus
//! the topic names subscribers register under.

use std::fmt;

use crate::cache::EvictionStrategy;

// == Topics ==
/// Topic names for every lifecycle event the cache publishes.
pub mod topics {
    pub const SET: &str = "cache:set";
    pub const HIT: &str = "cache:hit";
    pub const MISS: &str = "cache:miss";
    pub const DELETE: &str = "cache:delete";
    pub const CLEAR: &str = "cache:clear";
    pub const EVICTION: &str = "cache:eviction";
    pub const CLEANUP: &str = "cache:cleanup";

    /// All topics, for subscribers that want the full lifecycle.
    pub const ALL: [&str; 7] = [SET, HIT, MISS, DELETE, CLEAR, EVICTION, CLEANUP];
}

// == Eviction Reason ==
/// Why an entry was removed without an explicit delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionReason {
    /// The entry outlived its TTL
    Expired,
    /// The cache was at capacity and the strategy chose this entry
    Capacity(EvictionStrategy),
}

impl EvictionReason {
    /// Reason label carried in eviction events: `TTL_EXPIRED` or the
    /// strategy name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionReason::Expired => "TTL_EXPIRED",
            EvictionReason::Capacity(strategy) => strategy.as_str(),
        }
    }
}

impl fmt::Display for EvictionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Cache Event ==
/// Lifecycle event payload.
///
/// Each variant corresponds to exactly one topic; `topic()` gives the name
/// the event is published under.
#[derive(Debug, Clone)]
pub enum CacheEvent<V> {
    /// A value was stored
    Set { key: String, value: V, ttl_ms: u64 },
    /// A lookup found a live entry
    Hit { key: String, value: V },
    /// A lookup found nothing
    Miss { key: String },
    /// An entry was explicitly removed
    Delete { key: String, value: V },
    /// All entries were removed
    Clear { previous_size: usize },
    /// An entry was removed by expiry or capacity pressure
    Eviction {
        key: String,
        reason: EvictionReason,
        value: V,
    },
    /// An expiry sweep removed one or more entries
    Cleanup { removed: usize },
}

impl<V> CacheEvent<V> {
    /// The topic this event is published under.
    pub fn topic(&self) -> &'static str {
        match self {
            CacheEvent::Set { .. } => topics::SET,
            CacheEvent::Hit { .. } => topics::HIT,
            CacheEvent::Miss { .. } => topics::MISS,
            CacheEvent::Delete { .. } => topics::DELETE,
            CacheEvent::Clear { .. } => topics::CLEAR,
            CacheEvent::Eviction { .. } => topics::EVICTION,
            CacheEvent::Cleanup { .. } => topics::CLEANUP,
        }
    }
}
