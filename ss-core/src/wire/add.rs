use serde::{Deserialize, Serialize};

use crate::ids::{EmbeddingId, TenantId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddRequest {
    pub tenant_id: TenantId,
    pub encrypted_embedding_base64: String,
    pub lsh_hashes: Vec<u32>,
    #[serde(default)]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub external_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddStatus {
    Ok,
    /// Returned when `external_id` matched an existing record; the
    /// response carries that record's `embedding_id`, not a new one.
    Duplicate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddResponse {
    pub embedding_id: EmbeddingId,
    pub index_position: usize,
    pub status: AddStatus,
}
