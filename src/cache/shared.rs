//! Shared Store Module
//!
//! Thread-safe handle over [`LruStore`]. Every method takes the lock exactly
//! once and delegates to the unsynchronized store, so nothing re-enters the
//! lock.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::cache::{BatchOp, CacheStats, LruStore};
use crate::error::Result;

// == Shared Store ==
/// Cloneable, thread-safe LRU store.
///
/// Operations that change the store, including `get` because it promotes the
/// key, take the write lock, as do both snapshot operations. Pure reads share
/// the read lock.
#[derive(Debug, Clone)]
pub struct SharedStore {
    inner: Arc<RwLock<LruStore>>,
}

impl SharedStore {
    // == Constructor ==
    /// Creates a shared store holding at most `max_entries` entries.
    pub fn new(max_entries: usize) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(RwLock::new(LruStore::new(max_entries)?)),
        })
    }

    // == Put ==
    /// Inserts or updates a key, evicting the least recently used entry if full.
    pub fn put(&self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.write().put(key.into(), value.into());
    }

    // == Get ==
    /// Lookup with recency promotion (requires write lock).
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.write().get(key)
    }

    // == Exists ==
    /// Membership test without promotion.
    pub fn exists(&self, key: &str) -> bool {
        self.inner.read().exists(key)
    }

    // == Delete ==
    /// Removes a key; returns false if it was absent.
    pub fn delete(&self, key: &str) -> bool {
        self.inner.write().delete(key)
    }

    // == Prefix Scan ==
    /// Keys starting with `prefix`, unordered.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.inner.read().keys_with_prefix(prefix)
    }

    // == Length ==
    /// Current entry count, read under the lock.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Maximum number of entries, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    // == Clear ==
    /// Drops every entry and resets the statistics.
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    // == Stats ==
    /// Snapshot of the hit, miss and eviction counters.
    pub fn stats(&self) -> CacheStats {
        self.inner.read().stats()
    }

    // == Batch Apply ==
    /// Validates and applies `ops` inside a single write critical section.
    ///
    /// No other caller observes the store between validation and the last
    /// applied operation, nor any effect of a rejected batch.
    pub fn batch_apply(&self, ops: &[BatchOp]) -> Result<()> {
        self.inner.write().batch_apply(ops)
    }

    // == Snapshots ==
    /// Saves under the write lock; every caller waits for the file I/O.
    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> Result<()> {
        self.inner.write().save_snapshot(path)
    }

    /// Loads under the write lock; every caller waits for the file I/O.
    pub fn load_snapshot(&self, path: impl AsRef<Path>) -> Result<()> {
        self.inner.write().load_snapshot(path)
    }
}
