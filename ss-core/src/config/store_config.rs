use serde::{Deserialize, Serialize};

use crate::constants;

/// Ciphertext store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum live (non-deleted) embeddings a tenant may hold.
    pub embedding_quota: usize,
    /// Age, in seconds, after which soft-deleted embeddings become
    /// eligible for `purge_deleted`.
    pub purge_after_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            embedding_quota: constants::DEFAULT_TENANT_EMBEDDING_QUOTA,
            purge_after_secs: 86_400 * 7,
        }
    }
}
