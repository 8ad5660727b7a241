//! Plain serializable wire shapes for the three tenant-facing operations.
//! These types carry no behavior; decoding base64 payloads and validating
//! field invariants happens at the orchestrator boundary, not here.

mod add;
mod initialize;
mod search;

pub use add::{AddRequest, AddResponse, AddStatus};
pub use initialize::{InitializeRequest, InitializeResponse, WireHeContextParams, WireLshConfig};
pub use search::{SearchRequest, SearchResponse, SearchResultItem};
