use serde::{Deserialize, Serialize};

use crate::ids::{EmbeddingId, TenantId};

/// Append-only audit record for a completed search. Never carries
/// ciphertext bytes, plaintext vectors, or decrypted scores — only the
/// coarse plaintext-safe LSH codes and counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEvent {
    pub search_id: uuid::Uuid,
    pub tenant_id: TenantId,
    pub hash_codes: Vec<u32>,
    pub top_k: usize,
    pub rerank_cap: usize,
    pub candidates_found: usize,
    pub candidates_checked: usize,
    pub result_count: usize,
    pub lsh_duration_micros: u64,
    pub he_duration_micros: u64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A single scored result returned from a search, pairing a candidate's
/// identity with its (still-encrypted, wire-opaque) score bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub embedding_id: EmbeddingId,
    pub external_id: Option<String>,
    pub encrypted_score: Vec<u8>,
    pub lsh_matches: u32,
}
