mod context_error;
mod index_error;
mod lsh_error;
mod orchestrator_error;
mod store_error;
mod tenant_error;
mod validation_error;

pub use context_error::ContextError;
pub use index_error::IndexError;
pub use lsh_error::LshError;
pub use orchestrator_error::OrchestratorError;
pub use store_error::StoreError;
pub use tenant_error::TenantError;
pub use validation_error::ValidationError;

/// Top-level error type returned by every public operation in the engine.
/// Each component error converts into this via `#[from]`; callers match on
/// the variant they care about and otherwise treat it opaquely.
#[derive(Debug, thiserror::Error)]
pub enum SsError {
    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Lsh(#[from] LshError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Tenant(#[from] TenantError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Orchestrator(#[from] OrchestratorError),

    #[error("durable mirror error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SsResult<T> = Result<T, SsError>;
