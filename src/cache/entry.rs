//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL and access
//! metadata.

use serde::Serialize;

// == Cache Entry ==
/// A single stored value with its validity window and access metadata.
///
/// Timestamps are monotonic-clock readings in milliseconds, supplied by the
/// owning cache. Access metadata (`last_accessed`, `access_count`) is updated
/// only by successful lookups, never by insertion or existence checks.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Validity window in milliseconds, fixed at insertion
    pub ttl_ms: u64,
    /// Insertion timestamp
    pub created_at: u64,
    /// Timestamp of the most recent successful lookup
    pub last_accessed: u64,
    /// Number of successful lookups against this entry
    pub access_count: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry inserted at `now_ms`.
    ///
    /// `last_accessed` starts equal to `created_at` and `access_count` at
    /// zero.
    pub fn new(value: V, ttl_ms: u64, now_ms: u64) -> Self {
        Self {
            value,
            ttl_ms,
            created_at: now_ms,
            last_accessed: now_ms,
            access_count: 0,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived its TTL at `now_ms`.
    ///
    /// An entry is expired once strictly more than `ttl_ms` milliseconds
    /// have elapsed since creation; at exactly `created_at + ttl_ms` it is
    /// still live.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.created_at) > self.ttl_ms
    }

    // == Age ==
    /// Milliseconds elapsed since the entry was created.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.created_at)
    }

    // == Expires In ==
    /// Milliseconds until expiry, clamped at zero once elapsed.
    pub fn expires_in_ms(&self, now_ms: u64) -> u64 {
        self.ttl_ms.saturating_sub(self.age_ms(now_ms))
    }

    // == Touch ==
    /// Records a successful lookup at `now_ms`.
    pub fn touch(&mut self, now_ms: u64) {
        self.last_accessed = now_ms;
        self.access_count += 1;
    }
}

impl<V: Clone> CacheEntry<V> {
    /// Builds the diagnostic view of this entry as of `now_ms`.
    pub fn debug_view(&self, now_ms: u64) -> EntryDebug<V> {
        EntryDebug {
            value: self.value.clone(),
            ttl_ms: self.ttl_ms,
            age_ms: self.age_ms(now_ms),
            expires_in_ms: self.expires_in_ms(now_ms),
            last_accessed: self.last_accessed,
            access_count: self.access_count,
            is_expired: self.is_expired(now_ms),
        }
    }
}

// == Entry Debug View ==
/// Per-entry diagnostic snapshot returned by `ExpiringCache::debug_entries`.
#[derive(Debug, Clone, Serialize)]
pub struct EntryDebug<V> {
    pub value: V,
    pub ttl_ms: u64,
    pub age_ms: u64,
    pub expires_in_ms: u64,
    pub last_accessed: u64,
    pub access_count: u64,
    pub is_expired: bool,
}
