//! Cache Module
//!
//! Bounded in-memory key-value storage with LRU eviction, atomic batches and
//! text snapshots.

mod batch;
mod entry;
mod lru;
mod shared;
mod snapshot;
mod stats;
mod store;


// Re-export public types
pub use batch::BatchOp;
pub(crate) use entry::Entry;
pub(crate) use lru::LruList;
pub use shared::SharedStore;
pub use stats::CacheStats;
pub use store::LruStore;
