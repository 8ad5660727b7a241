//! # ss-orchestrator
//!
//! Tenant-scoped coordination layer: the only public entry point to the
//! engine. Wraps the HE context cache and worker pool, the LSH planes and
//! candidate search, the ciphertext store, and (optionally) the durable
//! mirror, behind per-tenant `initialize`/`add`/`search`/`stats`/`teardown`
//! operations.

mod orchestrator;
mod tenant_state;

pub use orchestrator::{SearchOrchestrator, TenantStats};
pub use tenant_state::TenantState;
