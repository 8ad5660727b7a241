use serde::{Deserialize, Serialize};

use crate::constants;

/// LSH service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LshConfig {
    /// Number of independent hash tables per tenant.
    pub tables: usize,
    /// Number of hyperplanes (hash bits) per table.
    pub bits_per_table: usize,
    /// Maximum candidates pulled from bucket union before HE scoring.
    pub max_candidates: usize,
}

impl Default for LshConfig {
    fn default() -> Self {
        Self {
            tables: constants::DEFAULT_LSH_TABLES,
            bits_per_table: constants::DEFAULT_LSH_BITS_PER_TABLE,
            max_candidates: constants::DEFAULT_MAX_CANDIDATES,
        }
    }
}
