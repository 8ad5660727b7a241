use serde::{Deserialize, Serialize};

/// Durable mirror configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite mirror database file.
    pub db_path: String,
    /// Whether to run in WAL mode.
    pub wal_mode: bool,
    /// SQLite busy timeout, in milliseconds.
    pub busy_timeout_ms: u32,
    /// Number of pooled read connections.
    pub read_pool_size: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: "secure_search.db".to_string(),
            wal_mode: true,
            busy_timeout_ms: 5_000,
            read_pool_size: 4,
        }
    }
}
