/// Search orchestrator errors: dispatch failures not already owned by a
/// lower-level component.
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error("operation on tenant {tenant_id} timed out after {millis}ms")]
    Timeout { tenant_id: String, millis: u64 },

    #[error("degraded mode: {component} unavailable, falling back to {fallback}")]
    DegradedMode { component: String, fallback: String },

    #[error("min_matches {min_matches} exceeds table count {table_count}")]
    MinMatchesOutOfRange {
        min_matches: u32,
        table_count: usize,
    },
}
