//! v003: lsh_entries.

use rusqlite::Connection;
use ss_core::errors::SsResult;

use crate::errors::to_storage_err;

pub fn migrate(conn: &Connection) -> SsResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS lsh_entries (
            tenant_id    TEXT NOT NULL,
            embedding_id INTEGER NOT NULL,
            table_index  INTEGER NOT NULL,
            hash_value   INTEGER NOT NULL,
            PRIMARY KEY (tenant_id, embedding_id, table_index),
            FOREIGN KEY (tenant_id, embedding_id)
                REFERENCES embeddings(tenant_id, embedding_id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_lsh_bucket
            ON lsh_entries(tenant_id, table_index, hash_value);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
