//! Configuration Module
//!
//! Handles loading the demo driver's settings from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Driver configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the main store can hold
    pub max_entries: usize,
    /// File used for the snapshot save/load round trip
    pub snapshot_path: PathBuf,
    /// Number of concurrent workers
    pub workers: usize,
    /// put/get/delete cycles performed by each worker
    pub ops_per_worker: usize,
    /// Capacity of the small store used to show eviction
    pub eviction_demo_capacity: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Store capacity (default: 100)
    /// - `SNAPSHOT_PATH` - Snapshot file (default: store_backup.txt)
    /// - `DEMO_WORKERS` - Concurrent workers (default: 5)
    /// - `DEMO_OPS_PER_WORKER` - Cycles per worker (default: 50)
    /// - `EVICTION_DEMO_CAPACITY` - Small store capacity (default: 5)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            snapshot_path: env::var("SNAPSHOT_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.snapshot_path),
            workers: parse_var("DEMO_WORKERS").unwrap_or(defaults.workers),
            ops_per_worker: parse_var("DEMO_OPS_PER_WORKER").unwrap_or(defaults.ops_per_worker),
            eviction_demo_capacity: parse_var("EVICTION_DEMO_CAPACITY")
                .unwrap_or(defaults.eviction_demo_capacity),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 100,
            snapshot_path: PathBuf::from("store_backup.txt"),
            workers: 5,
            ops_per_worker: 50,
            eviction_demo_capacity: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_entries, 100);
        assert_eq!(config.snapshot_path, PathBuf::from("store_backup.txt"));
        assert_eq!(config.workers, 5);
        assert_eq!(config.ops_per_worker, 50);
        assert_eq!(config.eviction_demo_capacity, 5);
    }

    #[test]
    fn test_config_from_env() {
        // Single test touches the environment so parallel tests cannot race
        env::remove_var("MAX_ENTRIES");
        env::remove_var("SNAPSHOT_PATH");
        env::remove_var("DEMO_WORKERS");
        env::remove_var("DEMO_OPS_PER_WORKER");
        env::remove_var("EVICTION_DEMO_CAPACITY");

        let config = Config::from_env();
        assert_eq!(config.max_entries, 100);
        assert_eq!(config.snapshot_path, PathBuf::from("store_backup.txt"));
        assert_eq!(config.workers, 5);

        env::set_var("MAX_ENTRIES", "42");
        env::set_var("DEMO_WORKERS", "not-a-number");
        env::set_var("SNAPSHOT_PATH", "/tmp/kv.txt");

        let config = Config::from_env();
        assert_eq!(config.max_entries, 42);
        assert_eq!(config.workers, 5);
        assert_eq!(config.snapshot_path, PathBuf::from("/tmp/kv.txt"));

        env::remove_var("MAX_ENTRIES");
        env::remove_var("DEMO_WORKERS");
        env::remove_var("SNAPSHOT_PATH");
    }
}
