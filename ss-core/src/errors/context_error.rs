/// HE context service errors.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("no HE context registered for tenant {tenant_id}")]
    NotFound { tenant_id: String },

    #[error("HE context build failed: {reason}")]
    BuildFailed { reason: String },

    #[error("invalid HE parameters: {reason}")]
    InvalidParameters { reason: String },

    #[error("secret material rejected: context service accepts public keys only")]
    SecretKeyRejected,

    #[error("noise budget exhausted after {operations} operations")]
    NoiseBudgetExhausted { operations: usize },

    #[error("rotation key missing for step {step}")]
    MissingGaloisKey { step: i32 },
}
