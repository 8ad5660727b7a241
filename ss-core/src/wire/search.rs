use serde::{Deserialize, Serialize};

use crate::ids::{EmbeddingId, TenantId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub tenant_id: TenantId,
    pub encrypted_query_base64: String,
    pub lsh_hashes: Vec<u32>,
    pub top_k: usize,
    #[serde(default)]
    pub rerank_candidates: Option<usize>,
    #[serde(default)]
    pub min_matches: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub embedding_id: EmbeddingId,
    pub encrypted_similarity_base64: String,
    #[serde(default)]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResultItem>,
    pub candidates_checked: usize,
    pub search_time_ms: u64,
}
