/// Ciphertext store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("embedding {embedding_id} not found for tenant {tenant_id}")]
    EmbeddingNotFound {
        tenant_id: String,
        embedding_id: u64,
    },

    #[error("embedding {embedding_id} already deleted")]
    AlreadyDeleted { embedding_id: u64 },

    #[error("tenant {tenant_id} quota exceeded: {used}/{limit} embeddings")]
    QuotaExceeded {
        tenant_id: String,
        used: usize,
        limit: usize,
    },

    #[error("ciphertext payload empty")]
    EmptyCiphertext,
}
