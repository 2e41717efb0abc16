//! Clock Abstraction Module
//!
//! Provides an injectable monotonic clock so TTL behavior can be tested
//! deterministically without real waiting.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

// == Clock Trait ==
/// A monotonic clock measured in milliseconds.
///
/// All cache timestamps (`created_at`, `last_accessed`) are readings from
/// this clock. Readings are only compared against each other, never against
/// wall-clock time.
pub trait Clock: Debug + Send {
    /// Returns the current monotonic time in milliseconds.
    fn now_ms(&self) -> u64;
}

// == System Clock ==
/// Production clock backed by `std::time::Instant`.
///
/// Milliseconds are measured from the moment the clock was created.
#[derive(Debug, Clone)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }
}

// == Manual Clock ==
/// Test clock that only moves when told to.
///
/// Clones share the same underlying time, so a test can keep one handle to
/// advance time while the cache owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a new manual clock starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the clock by `ms` milliseconds.
    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }

    /// Sets the clock to an absolute reading.
    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_monotonic() {
        let clock = SystemClock::new();
        let first = clock.now_ms();
        let second = clock.now_ms();
        assert!(second >= first);
    }

    #[test]
    fn test_manual_clock_starts_at_zero() {
        let clock = ManualClock::new();
        assert_eq!(clock.now_ms(), 0);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new();
        clock.advance(150);
        clock.advance(50);
        assert_eq!(clock.now_ms(), 200);
    }

    #[test]
    fn test_manual_clock_set() {
        let clock = ManualClock::new();
        clock.set(5_000);
        assert_eq!(clock.now_ms(), 5_000);
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance(1_000);
        assert_eq!(clock.now_ms(), 1_000);
    }
}
