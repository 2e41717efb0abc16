//! Background Tasks Module
//!
//! Contains background tasks for hosts that run the cache behind a lock.
//!
//! # Tasks
//! - TTL Sweep: Removes expired cache entries at configured intervals

mod sweep;

pub use sweep::spawn_sweep_task;
