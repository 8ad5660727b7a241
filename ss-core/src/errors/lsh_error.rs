/// LSH hashing errors.
#[derive(Debug, thiserror::Error)]
pub enum LshError {
    #[error("vector dimensionality mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("no hyperplanes registered for tenant {tenant_id}")]
    PlanesNotFound { tenant_id: String },

    #[error("invalid LSH configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("plane payload corrupt: {reason}")]
    PlaneDeserializationFailed { reason: String },

    #[error("cannot hash a zero-norm vector")]
    ZeroNormVector,
}
