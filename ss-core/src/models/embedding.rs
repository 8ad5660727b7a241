use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ids::{EmbeddingId, TenantId};

/// A stored, opaque ciphertext. The server never sees plaintext vectors
/// or their dimensionality through this record; `ciphertext` is handled
/// as inert bytes end to end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    pub tenant_id: TenantId,
    pub embedding_id: EmbeddingId,
    /// Optional client-supplied identifier, opaque to the server.
    pub external_id: Option<String>,
    /// Opaque ciphertext bytes. `Arc` so candidate fan-out during search
    /// scoring doesn't clone the payload per worker.
    #[serde(with = "ciphertext_bytes")]
    pub ciphertext: Arc<[u8]>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub deleted: bool,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl EmbeddingRecord {
    pub fn byte_len(&self) -> usize {
        self.ciphertext.len()
    }
}

/// Free-form, server-opaque metadata attached to an embedding. The server
/// never inspects the values; they are stored and returned verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbeddingMetadata {
    pub embedding_id: EmbeddingId,
    pub fields: serde_json::Map<String, serde_json::Value>,
}

mod ciphertext_bytes {
    use std::sync::Arc;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &Arc<[u8]>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_bytes(bytes)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Arc<[u8]>, D::Error> {
        let v = Vec::<u8>::deserialize(d)?;
        Ok(Arc::from(v.into_boxed_slice()))
    }
}
