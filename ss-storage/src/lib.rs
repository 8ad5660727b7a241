//! # ss-storage
//!
//! Durable SQLite mirror of tenant state and the recovery path that
//! rebuilds in-memory structures from it after a restart. Deliberately
//! narrow: no audit log, no row versioning, no compaction job — just the
//! three tables the orchestrator needs to survive a process restart.

mod errors;
mod migrations;
mod mirror;
mod pool;
mod recovery;

pub use mirror::DurableMirror;
pub use recovery::{recover_tenant, RecoveredTenant};
