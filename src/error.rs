//! Error types for the key-value store
//!
//! Provides unified error handling using thiserror.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

// == Store Error Enum ==
/// Unified error type for the key-value store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Store constructed with a capacity of zero
    #[error("Invalid capacity: a store must hold at least one entry")]
    InvalidCapacity,

    /// A batch was rejected during validation; nothing was applied
    #[error("Batch rejected: operation {index} reads missing key '{key}'")]
    BatchRejected { index: usize, key: String },

    /// Snapshot file could not be opened, read or written
    #[error("Snapshot I/O failed for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Snapshot content does not follow the expected layout
    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the store.
pub type Result<T> = std::result::Result<T, StoreError>;
