//! # ss-core
//!
//! Foundation crate for the secure similarity search engine.
//! Defines all types, errors, config, and constants shared by the
//! HE context service, the LSH service, the ciphertext store, the
//! durable mirror, and the search orchestrator.

pub mod config;
pub mod constants;
pub mod errors;
pub mod ids;
pub mod models;
pub mod wire;

pub use config::SsConfig;
pub use errors::{SsError, SsResult};
pub use ids::{EmbeddingId, TenantId};
