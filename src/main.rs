//! Mini KV - A bounded in-process key-value store
//!
//! Demo driver: exercises the store's basic operations, prefix scans,
//! snapshots, batches, concurrent workers and LRU eviction.

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_kv::{BatchOp, Config, SharedStore};

/// Main entry point for the demo driver.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Run each demonstration against a shared store
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_kv=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Mini KV demo");

    let config = Config::from_env();
    info!(
        "Configuration loaded: max_entries={}, snapshot={}, workers={}, ops_per_worker={}",
        config.max_entries,
        config.snapshot_path.display(),
        config.workers,
        config.ops_per_worker
    );

    let store = SharedStore::new(config.max_entries).context("creating main store")?;

    basic_operations(&store);
    prefix_search(&store);
    persistence(&store, &config)?;
    batch_operations(&store)?;
    concurrent_workers(&store, &config).await?;
    lru_eviction(&config)?;

    info!(
        "Final stats: {}",
        serde_json::to_string(&store.stats()).context("serializing stats")?
    );
    info!("Mini KV demo completed");
    Ok(())
}

fn describe(value: Option<String>) -> String {
    value.unwrap_or_else(|| "<not found>".to_string())
}

fn basic_operations(store: &SharedStore) {
    info!("== Basic operations ==");

    store.put("user1", "John Doe");
    store.put("user2", "Jane Smith");
    store.put("user3", "Bob Johnson");

    info!("user1: {}", describe(store.get("user1")));
    info!("user2: {}", describe(store.get("user2")));
    info!("nonexistent: {}", describe(store.get("nonexistent")));

    store.delete("user2");
    info!("After deleting user2: {}", describe(store.get("user2")));
}

fn prefix_search(store: &SharedStore) {
    info!("== Prefix search ==");

    store.put("user23", "Emily Davis");
    store.put("user45", "Michael Brown");

    let mut keys = store.keys_with_prefix("user");
    keys.sort();
    for key in keys {
        let value = describe(store.get(&key));
        info!("- {}: {}", key, value);
    }
}

fn persistence(store: &SharedStore, config: &Config) -> anyhow::Result<()> {
    info!("== Persistence ==");

    store
        .save_snapshot(&config.snapshot_path)
        .context("saving snapshot")?;

    let loaded = SharedStore::new(config.max_entries)?;
    loaded
        .load_snapshot(&config.snapshot_path)
        .context("loading snapshot")?;
    info!(
        "Loaded {} entries, user1: {}",
        loaded.len(),
        describe(loaded.get("user1"))
    );
    Ok(())
}

fn batch_operations(store: &SharedStore) -> anyhow::Result<()> {
    info!("== Batch operations ==");

    let ops = vec![
        BatchOp::put("batch1", "Batch Value 1"),
        BatchOp::put("batch2", "Batch Value 2"),
        BatchOp::delete("user1"),
    ];
    store.batch_apply(&ops).context("applying batch")?;
    info!("batch1: {}", describe(store.get("batch1")));
    info!("batch2: {}", describe(store.get("batch2")));
    info!("user1 present after batch: {}", store.exists("user1"));

    let rejected = [BatchOp::put("batch3", "never"), BatchOp::get("user1")];
    if let Err(e) = store.batch_apply(&rejected) {
        info!("Second batch rejected as expected: {}", e);
    }
    info!("batch3 present: {}", store.exists("batch3"));
    Ok(())
}

/// Each worker writes, reads back and sometimes deletes its own keys.
fn worker(store: SharedStore, id: usize, ops: usize) -> usize {
    let mut mismatches = 0;
    for i in 0..ops {
        let key = format!("thread_{}_key_{}", id, i);
        let value = format!("value_{}", i);

        store.put(key.clone(), value.clone());
        // A concurrent insert may legitimately evict the key before we read it
        if let Some(retrieved) = store.get(&key) {
            if retrieved != value {
                warn!("Worker {}: value mismatch for key {}", id, key);
                mismatches += 1;
            }
        }

        if i % 3 == 0 {
            store.delete(&key);
        }
    }
    mismatches
}

async fn concurrent_workers(store: &SharedStore, config: &Config) -> anyhow::Result<()> {
    info!("== Concurrent workers: {} ==", config.workers);

    let handles: Vec<_> = (0..config.workers)
        .map(|id| {
            let store = store.clone();
            let ops = config.ops_per_worker;
            tokio::task::spawn_blocking(move || worker(store, id, ops))
        })
        .collect();

    let mut mismatches = 0;
    for handle in handles {
        mismatches += handle.await.context("worker panicked")?;
    }

    info!(
        "Workers finished: size={}, capacity={}, mismatches={}",
        store.len(),
        store.capacity(),
        mismatches
    );
    Ok(())
}

fn lru_eviction(config: &Config) -> anyhow::Result<()> {
    info!("== LRU eviction ==");

    let capacity = config.eviction_demo_capacity;
    let small = SharedStore::new(capacity).context("creating eviction demo store")?;

    for i in 1..=capacity + 2 {
        let key = format!("lru_key_{}", i);
        small.put(key.clone(), format!("value_{}", i));
        info!("Added {}", key);
    }

    for i in [1, 2, capacity + 2] {
        let key = format!("lru_key_{}", i);
        let state = if small.exists(&key) { "present" } else { "evicted" };
        info!("{}: {}", key, state);
    }
    info!("Evictions: {}", small.stats().evictions);
    Ok(())
}
