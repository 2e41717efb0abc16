//! Beacon Cache - an embeddable in-memory cache with lifecycle events
//!
//! Provides bounded key/value storage with per-entry TTL expiry, pluggable
//! eviction strategies (LRU, FIFO, LFU), and a publish/subscribe channel
//! that lets logging, metrics, or UI observe the cache without the cache
//! knowing about them.

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod tasks;

pub use cache::{
    CacheEntry, CacheEvent, CacheStats, EntryDebug, EvictionReason, EvictionStrategy,
    ExpiringCache, StatsSnapshot,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CacheConfig, ConfigUpdate};
pub use error::{CacheError, Result};
pub use events::{EventChannel, SubscriberId};
pub use tasks::spawn_sweep_task;
