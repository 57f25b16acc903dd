//! Batch Operation Module
//!
//! Defines the operations accepted by `batch_apply`.

use serde::{Deserialize, Serialize};

// == Batch Op ==
/// One step of an all-or-nothing batch.
///
/// Serialized as `{"op": "put", "key": "k", "value": "v"}`,
/// `{"op": "delete", "key": "k"}` or `{"op": "get", "key": "k"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum BatchOp {
    /// Insert or update a key
    Put { key: String, value: String },
    /// Remove a key if present
    Delete { key: String },
    /// Require the key to exist before the batch runs
    Get { key: String },
}

impl BatchOp {
    pub fn put(key: impl Into<String>, value: impl Into<String>) -> Self {
        BatchOp::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn delete(key: impl Into<String>) -> Self {
        BatchOp::Delete { key: key.into() }
    }

    pub fn get(key: impl Into<String>) -> Self {
        BatchOp::Get { key: key.into() }
    }
}
