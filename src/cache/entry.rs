//! Store Entry Module
//!
//! Defines what the lookup index keeps for every key.

use crate::cache::lru::NodeId;

// == Entry ==
/// A stored value and the position of its key in the recency list.
#[derive(Debug, Clone)]
pub struct Entry {
    /// The stored value
    pub value: String,
    /// Handle of the key's node in the LRU list
    pub node: NodeId,
}

impl Entry {
    // == Constructor ==
    pub fn new(value: String, node: NodeId) -> Self {
        Self { value, node }
    }

    // == Replace ==
    /// Swaps in a new value and returns the previous one.
    pub fn replace(&mut self, value: String) -> String {
        std::mem::replace(&mut self.value, value)
    }
}
