mod embedding;
mod he_context_params;
mod lsh_entry;
mod search_event;
mod tenant;

pub use embedding::{EmbeddingMetadata, EmbeddingRecord};
pub use he_context_params::HeContextParams;
pub use lsh_entry::{LshEntry, LshEntryRow};
pub use search_event::{ScoredCandidate, SearchEvent};
pub use tenant::TenantRecord;
