/// Request validation errors, raised before any component work begins.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("empty tenant id")]
    EmptyTenantId,

    #[error("vector dimensionality {dim} exceeds maximum {max_dim}")]
    DimensionTooLarge { dim: usize, max_dim: usize },

    #[error("vector dimensionality must be positive")]
    ZeroDimension,

    #[error("top_k must be positive")]
    ZeroTopK,

    #[error("base64 payload malformed: {reason}")]
    MalformedBase64 { reason: String },

    #[error("expected {expected} LSH hash codes, got {actual}")]
    HashCodeCountMismatch { expected: usize, actual: usize },

    #[error("top_k {top_k} exceeds rerank_cap {rerank_cap}")]
    TopKExceedsRerankCap { top_k: usize, rerank_cap: usize },

    #[error("hash value {value} does not fit in {bits} bits")]
    HashValueOutOfRange { value: u32, bits: u32 },
}
