use serde::{Deserialize, Serialize};

use crate::ids::TenantId;

/// Serializable, public-only parameters needed to rebuild a tenant's HE
/// context after a process restart or cache eviction. Never holds secret
/// key material — the server only ever sees public keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeContextParams {
    pub tenant_id: TenantId,
    pub poly_modulus_degree: u64,
    pub coeff_modulus_bits: Vec<i32>,
    pub scale: f64,
    /// Serialized SEAL public key bytes.
    pub public_key_bytes: Vec<u8>,
    /// Serialized SEAL Galois (rotation) key bytes.
    pub galois_key_bytes: Vec<u8>,
}
