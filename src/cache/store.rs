//! LRU Store Module
//!
//! Main store engine combining HashMap storage with O(1) recency tracking.
//! Nothing in here locks; [`SharedStore`](crate::cache::SharedStore) wraps
//! it for concurrent use.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, ErrorKind};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::cache::{snapshot, BatchOp, CacheStats, Entry, LruList};
use crate::error::{Result, StoreError};

// == LRU Store ==
/// Bounded key-value storage with least-recently-used eviction.
///
/// A key is in `entries` iff it is linked exactly once in `order`.
#[derive(Debug)]
pub struct LruStore {
    /// Key-value storage
    entries: HashMap<String, Entry>,
    /// Recency ordering, most recent first
    order: LruList,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
}

impl LruStore {
    // == Constructor ==
    /// Creates an empty store holding at most `max_entries` entries.
    ///
    /// Fails with [`StoreError::InvalidCapacity`] when `max_entries` is zero.
    pub fn new(max_entries: usize) -> Result<Self> {
        if max_entries == 0 {
            return Err(StoreError::InvalidCapacity);
        }

        Ok(Self {
            entries: HashMap::new(),
            order: LruList::new(),
            stats: CacheStats::new(),
            max_entries,
        })
    }

    // == Put ==
    /// Inserts or updates a key and marks it most recently used.
    ///
    /// Updating an existing key never evicts. Inserting a new key into a full
    /// store evicts the least recently used entry first.
    pub fn put(&mut self, key: String, value: String) {
        self.upsert(key, value);
    }

    // == Get ==
    /// Returns the value for `key` and marks it most recently used.
    ///
    /// Returns None when the key is absent. An empty value is a hit.
    pub fn get(&mut self, key: &str) -> Option<String> {
        match self.entries.get(key) {
            Some(entry) => {
                let value = entry.value.clone();
                self.order.move_to_front(entry.node);
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Exists ==
    /// Membership test. Does not touch the recency order.
    pub fn exists(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Delete ==
    /// Removes `key` if present. Returns whether an entry was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove_entry(key)
    }

    // == Prefix Scan ==
    /// Returns every key starting with `prefix`, in no particular order.
    ///
    /// An empty prefix matches all keys. Does not touch the recency order.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.entries
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect()
    }

    // == Clear ==
    /// Removes every entry and resets the statistics.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.stats.reset();
    }

    // == Batch Apply ==
    /// Validates then applies `ops` as one unit.
    ///
    /// Any `Get` whose key is absent before the batch starts rejects the whole
    /// batch and leaves the store untouched. Otherwise puts and deletes are
    /// applied in order; `Get` steps only take part in validation.
    pub fn batch_apply(&mut self, ops: &[BatchOp]) -> Result<()> {
        for (index, op) in ops.iter().enumerate() {
            if let BatchOp::Get { key } = op {
                if !self.entries.contains_key(key) {
                    debug!(index, key = %key, "Batch rejected on missing key");
                    return Err(StoreError::BatchRejected {
                        index,
                        key: key.clone(),
                    });
                }
            }
        }

        for op in ops {
            match op {
                BatchOp::Put { key, value } => self.upsert(key.clone(), value.clone()),
                BatchOp::Delete { key } => {
                    self.remove_entry(key);
                }
                BatchOp::Get { .. } => {}
            }
        }

        debug!(ops = ops.len(), "Batch applied");
        Ok(())
    }

    // == Save Snapshot ==
    /// Writes every entry to `path`, most recently used first.
    ///
    /// A failure part way through leaves a truncated file behind.
    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| StoreError::io(path, e))?;
        let mut writer = BufWriter::new(file);

        let entries = self.iter();
        snapshot::encode(&mut writer, self.entries.len(), entries)
            .map_err(|e| StoreError::io(path, e))?;

        info!(
            "Snapshot saved: {} entries to {}",
            self.entries.len(),
            path.display()
        );
        Ok(())
    }

    // == Load Snapshot ==
    /// Replaces the whole store with the contents of `path`.
    ///
    /// The file's first entry becomes the most recently used, so a saved
    /// store reloads in the same recency order. When the snapshot holds more
    /// than `max_entries` entries only the most recent ones are kept. On any
    /// error the current contents are left untouched.
    pub fn load_snapshot(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::InvalidData => {
                StoreError::MalformedSnapshot(format!("{} is not valid UTF-8", path.display()))
            }
            _ => StoreError::io(path, e),
        })?;
        let decoded = snapshot::decode(&text)?;
        let total = decoded.len();

        self.clear();
        for (key, value) in decoded {
            if self.entries.len() == self.max_entries {
                break;
            }
            if self.entries.contains_key(&key) {
                continue;
            }
            let node = self.order.push_back(key.clone());
            self.entries.insert(key, Entry::new(value, node));
        }
        self.stats.set_total_entries(self.entries.len());

        if self.entries.len() < total {
            warn!(
                "Snapshot {} held {} entries, kept {} (capacity {})",
                path.display(),
                total,
                self.entries.len(),
                self.max_entries
            );
        }
        info!(
            "Snapshot loaded: {} entries from {}",
            self.entries.len(),
            path.display()
        );
        Ok(())
    }

    // == Iter ==
    /// Iterates (key, value) pairs from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.order.iter().filter_map(move |key| {
            self.entries
                .get(key)
                .map(|entry| (key, entry.value.as_str()))
        })
    }

    // == Stats ==
    /// Returns current store statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Capacity ==
    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    // == Primitives ==
    // Shared by the single-key operations and batch_apply.

    fn upsert(&mut self, key: String, value: String) {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.replace(value);
            self.order.move_to_front(entry.node);
            return;
        }

        if self.entries.len() >= self.max_entries {
            self.evict_lru();
        }

        let node = self.order.push_front(key.clone());
        self.entries.insert(key, Entry::new(value, node));
        self.stats.set_total_entries(self.entries.len());
        debug_assert_eq!(self.entries.len(), self.order.len());
    }

    fn evict_lru(&mut self) {
        if let Some(victim) = self.order.pop_back() {
            self.entries.remove(&victim);
            self.stats.record_eviction();
            debug!(key = %victim, "Evicted least recently used entry");
        }
    }

    fn remove_entry(&mut self, key: &str) -> bool {
        match self.entries.remove(key) {
            Some(entry) => {
                self.order.remove(entry.node);
                self.stats.set_total_entries(self.entries.len());
                debug_assert_eq!(self.entries.len(), self.order.len());
                true
            }
            None => false,
        }
    }
}
