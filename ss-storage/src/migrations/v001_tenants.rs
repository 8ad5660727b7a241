//! v001: tenants.

use rusqlite::Connection;
use ss_core::errors::SsResult;

use crate::errors::to_storage_err;

pub fn migrate(conn: &Connection) -> SsResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS tenants (
            tenant_id            TEXT PRIMARY KEY,
            embedding_dim        INTEGER NOT NULL,
            lsh_tables           INTEGER NOT NULL,
            lsh_bits_per_table   INTEGER NOT NULL,
            rerank_cap           INTEGER NOT NULL,
            max_items            INTEGER NOT NULL,
            poly_modulus_degree  INTEGER NOT NULL,
            coeff_modulus_bits   TEXT NOT NULL,
            scale                REAL NOT NULL,
            public_key_bytes     BLOB NOT NULL,
            galois_key_bytes     BLOB NOT NULL,
            plane_blob           BLOB NOT NULL,
            created_at           TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
