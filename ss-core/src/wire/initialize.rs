use serde::{Deserialize, Serialize};

use crate::ids::TenantId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireHeContextParams {
    pub scheme: String,
    pub poly_modulus_degree: u64,
    pub scale: f64,
    pub public_key_base64: String,
    /// Serialized Galois (rotation) keys, required to sum encrypted slots
    /// during `inner_product`.
    pub galois_keys_base64: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireLshConfig {
    pub num_tables: usize,
    pub hash_size: usize,
    pub num_candidates: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeRequest {
    pub tenant_id: TenantId,
    pub context_params: WireHeContextParams,
    pub embedding_dim: usize,
    pub lsh_config: WireLshConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResponse {
    pub tenant_id: TenantId,
    pub server_id: String,
    pub max_db_size: usize,
    pub supported_operations: Vec<String>,
    pub lsh_config: WireLshConfig,
    /// Little-endian, versioned plane blob (see the LSH wire format),
    /// base64-encoded for transport.
    pub random_planes_base64: String,
}
