/// LSH index errors.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("table index {table_index} out of range: tenant has {table_count} tables")]
    TableOutOfRange {
        table_index: usize,
        table_count: usize,
    },

    #[error("index entry for embedding {embedding_id} not found in table {table_index}")]
    EntryNotFound {
        embedding_id: u64,
        table_index: usize,
    },
}
