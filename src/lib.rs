//! Mini KV - A bounded in-process key-value store
//!
//! Provides a thread-safe LRU store with prefix scans, atomic batches and
//! plain text snapshots.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{BatchOp, CacheStats, LruStore, SharedStore};
pub use config::Config;
pub use error::{Result, StoreError};
