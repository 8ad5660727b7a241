use serde::{Deserialize, Serialize};

use crate::ids::{EmbeddingId, TenantId};

/// One row of the LSH index: a single table's hash code for a single
/// embedding. Exactly T of these exist per live embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LshEntry {
    pub embedding_id: EmbeddingId,
    pub table_index: usize,
    pub hash_value: u32,
}

impl LshEntry {
    pub fn new(embedding_id: EmbeddingId, table_index: usize, hash_value: u32) -> Self {
        Self {
            embedding_id,
            table_index,
            hash_value,
        }
    }
}

/// Owning context for a set of LSH entries belonging to one tenant, used
/// when persisting or replaying entries through the durable mirror.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LshEntryRow {
    pub tenant_id: TenantId,
    pub entry: LshEntry,
}
