//! # ss-store
//!
//! Per-tenant ciphertext store and LSH inverted index. Both structures
//! are plain `DashMap`-backed collections; the readers-writer lock
//! discipline that coordinates them lives in `ss-orchestrator`.

mod ciphertext_store;
mod lsh_index;

pub use ciphertext_store::CiphertextStore;
pub use lsh_index::LshIndex;
