use serde::{Deserialize, Serialize};

use crate::ids::TenantId;

/// A registered tenant's immutable parameters, fixed at `initialize` and
/// never changed for the lifetime of the tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantRecord {
    pub tenant_id: TenantId,
    /// Embedding vector dimensionality, fixed after creation.
    pub embedding_dim: usize,
    /// Number of LSH hash tables.
    pub lsh_tables: usize,
    /// Number of hash bits per table.
    pub lsh_bits_per_table: usize,
    /// Default candidate cap applied during reranking when a search
    /// request does not specify one.
    pub rerank_cap: usize,
    /// Maximum number of live embeddings this tenant may hold.
    pub max_items: usize,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
