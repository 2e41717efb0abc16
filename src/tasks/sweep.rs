//! TTL Sweep Task
//!
//! Background task that periodically removes expired cache entries.
//!
//! Lazy reconciliation on the operation path already guarantees correct
//! expiry semantics; this task is optional housekeeping that bounds how
//! long an idle cache keeps dead entries around.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ExpiringCache;
use crate::clock::Clock;

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task loops forever, sleeping for the configured interval between
/// sweeps. The cache lives behind a single mutex held for the whole sweep,
/// so concurrent callers always observe a fully reconciled store.
///
/// # Arguments
/// * `cache` - Shared handle to the cache
/// * `sweep_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task; abort it during shutdown.
pub fn spawn_sweep_task<V, C>(
    cache: Arc<Mutex<ExpiringCache<V, C>>>,
    sweep_interval_secs: u64,
) -> JoinHandle<()>
where
    V: Clone + Send + 'static,
    C: Clock + 'static,
{
    let interval = Duration::from_secs(sweep_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting TTL sweep task with interval of {} seconds",
            sweep_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache_guard = cache.lock().await;
                cache_guard.sweep_expired()
            };

            if removed > 0 {
                info!("TTL sweep: removed {} expired entries", removed);
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }
    })
}
