//! Store Statistics Module
//!
//! Counters kept by `LruStore`. Only `get` counts as a lookup; `exists`,
//! prefix scans and batch `get` steps leave the counters alone. Evictions
//! include those caused by puts inside a batch. `clear` and a successful
//! snapshot load start the counters over.

use serde::Serialize;

// == Cache Stats ==
/// Lookup and eviction counters for one store.
///
/// Serializes to a flat JSON object, which the demo driver logs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of `get` calls that found their key
    pub hits: u64,
    /// Number of `get` calls for an absent key
    pub misses: u64,
    /// Number of entries evicted by the LRU policy
    pub evictions: u64,
    /// Current number of entries in the store
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Share of `get` calls that found their key; 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Counts a `get` that found its key.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Counts one entry dropped to make room for a new key.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Mirrors the store's entry count after each mutation.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }

    // == Reset ==
    /// Starts over after the store's contents were replaced wholesale.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
