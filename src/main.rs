//! Beacon Cache - demonstration binary
//!
//! Wires tracing-based subscribers to the cache's lifecycle events and
//! exercises TTL expiry, the three eviction strategies, and the statistics
//! surface. The library itself ships no observers; this binary plays the
//! hosting-service role.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use beacon_cache::cache::events::topics;
use beacon_cache::{spawn_sweep_task, CacheConfig, CacheEvent, ConfigUpdate, ExpiringCache};

/// Main entry point for the demo.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load cache configuration from environment variables
/// 3. Create the cache and wire event-logging subscribers
/// 4. Start the background TTL sweep task
/// 5. Run the scripted demonstration
/// 6. Abort the sweep task and exit
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beacon_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Beacon Cache demo");

    let config = CacheConfig::from_env();
    info!(
        strategy = %config.eviction_strategy,
        default_ttl_ms = config.default_ttl_ms,
        max_size = ?config.max_size,
        "Configuration loaded"
    );

    let sweep_interval_secs: u64 = env::var("SWEEP_INTERVAL")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(1);

    let mut cache: ExpiringCache<Value> = ExpiringCache::new(config);
    wire_event_logging(&mut cache)?;

    let cache = Arc::new(Mutex::new(cache));
    let sweep_handle = spawn_sweep_task(Arc::clone(&cache), sweep_interval_secs);
    info!("Background sweep task started");

    run_demo(&cache).await?;

    sweep_handle.abort();
    info!("Demo complete");
    Ok(())
}

/// Subscribes a logging observer to every cache lifecycle topic.
///
/// Each topic only ever carries its own event variant; the match fans the
/// payload out to an appropriately shaped log line.
fn wire_event_logging(cache: &mut ExpiringCache<Value>) -> beacon_cache::Result<()> {
    for topic in topics::ALL {
        cache
            .events_mut()
            .subscribe(topic, |event: &CacheEvent<Value>| match event {
                CacheEvent::Set { key, ttl_ms, .. } => {
                    info!(key = %key, ttl_ms, "CACHE SET");
                }
                CacheEvent::Hit { key, .. } => info!(key = %key, "CACHE HIT"),
                CacheEvent::Miss { key } => info!(key = %key, "CACHE MISS"),
                CacheEvent::Delete { key, .. } => info!(key = %key, "CACHE DELETE"),
                CacheEvent::Clear { previous_size } => {
                    info!(previous_size, "CACHE CLEAR");
                }
                CacheEvent::Eviction { key, reason, .. } => {
                    info!(key = %key, reason = %reason, "CACHE EVICTION");
                }
                CacheEvent::Cleanup { removed } => info!(removed, "CACHE CLEANUP"),
            })?;
    }
    Ok(())
}

/// Scripted walk through the cache's behavior.
async fn run_demo(cache: &Arc<Mutex<ExpiringCache<Value>>>) -> anyhow::Result<()> {
    info!("1. Storing entries with mixed TTLs");
    {
        let mut cache = cache.lock().await;
        cache.configure(ConfigUpdate {
            default_ttl_ms: Some(10_000),
            max_size: Some(5),
            ..Default::default()
        });

        cache.set("user:1", json!({"id": 1, "name": "Ada"}), Some(1_500))?;
        cache.set("user:2", json!({"id": 2, "name": "Grace"}), None)?;
        cache.set("config:app", json!({"theme": "dark"}), Some(15_000))?;
        info!(keys = ?cache.keys(), "Stored");
    }

    info!("2. Lookups: one hit, one miss");
    {
        let mut cache = cache.lock().await;
        let _ = cache.get("user:1");
        let _ = cache.get("user:3");
    }

    info!("3. Waiting for the short-lived entry to expire");
    tokio::time::sleep(Duration::from_millis(1_600)).await;
    {
        let mut cache = cache.lock().await;
        // Expired during the wait; the lookup reconciles and misses
        let _ = cache.get("user:1");
        let _ = cache.get("user:2");
    }

    info!("4. FIFO eviction");
    {
        let mut cache = cache.lock().await;
        cache.clear();
        cache.configure(ConfigUpdate {
            eviction_strategy: Some("FIFO".to_string()),
            max_size: Some(3),
            ..Default::default()
        });

        for item in ["item1", "item2", "item3", "item4"] {
            cache.set(item, json!(item), None)?;
        }
        info!(keys = ?cache.keys(), "After FIFO overflow");
    }

    info!("5. LFU eviction");
    {
        let mut cache = cache.lock().await;
        cache.clear();
        cache.configure(ConfigUpdate {
            eviction_strategy: Some("LFU".to_string()),
            max_size: Some(2),
            ..Default::default()
        });

        cache.set("A", json!("valueA"), None)?;
        cache.set("B", json!("valueB"), None)?;
        for _ in 0..3 {
            let _ = cache.get("A");
        }
        let _ = cache.get("B");

        cache.set("C", json!("valueC"), None)?;
        info!(keys = ?cache.keys(), "After LFU overflow");
    }

    {
        let cache = cache.lock().await;
        info!(
            "6. Statistics:\n{}",
            serde_json::to_string_pretty(&cache.statistics())?
        );
        info!(
            "7. Debug view:\n{}",
            serde_json::to_string_pretty(&cache.debug_entries())?
        );
        info!(channel = ?cache.events().snapshot(), "Subscriber snapshot");
    }

    Ok(())
}
