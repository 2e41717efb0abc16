//! Error types for the cache library
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache and event-channel operations.
///
/// "Key not found" is deliberately not an error: lookups return `Option`
/// so that an absent key is never conflated with a stored value.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key is empty, whitespace-only, or exceeds the length limit
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Event topic is empty or whitespace-only
    #[error("Invalid event name: {0}")]
    InvalidEventName(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache library.
pub type Result<T> = std::result::Result<T, CacheError>;
