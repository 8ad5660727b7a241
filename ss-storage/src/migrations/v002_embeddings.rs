//! v002: embeddings.

use rusqlite::Connection;
use ss_core::errors::SsResult;

use crate::errors::to_storage_err;

pub fn migrate(conn: &Connection) -> SsResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS embeddings (
            embedding_id  INTEGER NOT NULL,
            tenant_id     TEXT NOT NULL,
            external_id   TEXT,
            ciphertext    BLOB NOT NULL,
            size_bytes    INTEGER NOT NULL,
            created_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            deleted_at    TEXT,
            PRIMARY KEY (tenant_id, embedding_id),
            FOREIGN KEY (tenant_id) REFERENCES tenants(tenant_id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_embeddings_tenant ON embeddings(tenant_id);
        CREATE INDEX IF NOT EXISTS idx_embeddings_deleted ON embeddings(tenant_id, deleted_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
