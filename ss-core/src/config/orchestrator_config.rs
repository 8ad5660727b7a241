use serde::{Deserialize, Serialize};

/// Search orchestrator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Default minimum number of matching LSH tables a candidate needs to
    /// be considered, when a search request does not specify one.
    pub default_min_matches: u32,
    /// Per-operation timeout, in milliseconds.
    pub operation_timeout_ms: u64,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            default_min_matches: 1,
            operation_timeout_ms: 30_000,
        }
    }
}
