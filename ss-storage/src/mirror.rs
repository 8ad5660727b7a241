use std::path::Path;

use rusqlite::params;
use ss_core::errors::SsResult;
use ss_core::ids::{EmbeddingId, TenantId};
use ss_core::models::{EmbeddingRecord, HeContextParams, LshEntry, TenantRecord};

use crate::errors::to_storage_err;
use crate::pool::ConnectionPool;

/// Durable SQLite mirror of one process's tenant state. Every mutation the
/// orchestrator applies to its in-memory structures is also written here,
/// so a restart can rebuild state by scanning these three tables for each
/// known tenant (see `recovery::recover_tenant`).
pub struct DurableMirror {
    pool: ConnectionPool,
}

impl DurableMirror {
    pub fn open(path: &Path, wal_mode: bool, busy_timeout_ms: u32, read_pool_size: usize) -> SsResult<Self> {
        Ok(Self {
            pool: ConnectionPool::open(path, wal_mode, busy_timeout_ms, read_pool_size)?,
        })
    }

    pub fn open_in_memory(read_pool_size: usize) -> SsResult<Self> {
        Ok(Self {
            pool: ConnectionPool::open_in_memory(read_pool_size)?,
        })
    }

    pub fn write_tenant(
        &self,
        tenant: &TenantRecord,
        he_params: &HeContextParams,
        plane_blob: &[u8],
    ) -> SsResult<()> {
        self.pool.writer.with_conn(|conn| {
            conn.execute(
                "INSERT INTO tenants (
                    tenant_id, embedding_dim, lsh_tables, lsh_bits_per_table,
                    rerank_cap, max_items, poly_modulus_degree, coeff_modulus_bits,
                    scale, public_key_bytes, galois_key_bytes, plane_blob, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                params![
                    tenant.tenant_id.as_str(),
                    tenant.embedding_dim as i64,
                    tenant.lsh_tables as i64,
                    tenant.lsh_bits_per_table as i64,
                    tenant.rerank_cap as i64,
                    tenant.max_items as i64,
                    he_params.poly_modulus_degree as i64,
                    serde_json::to_string(&he_params.coeff_modulus_bits)
                        .map_err(|e| to_storage_err(e.to_string()))?,
                    he_params.scale,
                    he_params.public_key_bytes,
                    he_params.galois_key_bytes,
                    plane_blob,
                    tenant.created_at.to_rfc3339(),
                ],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(())
        })
    }

    pub fn write_embedding(&self, record: &EmbeddingRecord) -> SsResult<()> {
        self.pool.writer.with_conn(|conn| {
            conn.execute(
                "INSERT INTO embeddings (
                    embedding_id, tenant_id, external_id, ciphertext, size_bytes, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    record.embedding_id.0 as i64,
                    record.tenant_id.as_str(),
                    record.external_id,
                    &*record.ciphertext,
                    record.byte_len() as i64,
                    record.created_at.to_rfc3339(),
                ],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(())
        })
    }

    pub fn write_lsh_entries(
        &self,
        tenant_id: &TenantId,
        embedding_id: EmbeddingId,
        entries: &[LshEntry],
    ) -> SsResult<()> {
        self.pool.writer.with_conn(|conn| {
            for entry in entries {
                conn.execute(
                    "INSERT INTO lsh_entries (tenant_id, embedding_id, table_index, hash_value)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        tenant_id.as_str(),
                        embedding_id.0 as i64,
                        entry.table_index as i64,
                        entry.hash_value,
                    ],
                )
                .map_err(|e| to_storage_err(e.to_string()))?;
            }
            Ok(())
        })
    }

    pub fn mark_embedding_deleted(
        &self,
        tenant_id: &TenantId,
        embedding_id: EmbeddingId,
        deleted_at: chrono::DateTime<chrono::Utc>,
    ) -> SsResult<()> {
        self.pool.writer.with_conn(|conn| {
            conn.execute(
                "UPDATE embeddings SET deleted_at = ?1 WHERE tenant_id = ?2 AND embedding_id = ?3",
                params![deleted_at.to_rfc3339(), tenant_id.as_str(), embedding_id.0 as i64],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(())
        })
    }

    /// All tenant ids the mirror currently knows about, used to rebuild
    /// every tenant's state after a restart (recovery has no other way
    /// to discover which tenants existed).
    pub fn list_tenant_ids(&self) -> SsResult<Vec<TenantId>> {
        self.pool.readers.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT tenant_id FROM tenants")
                .map_err(|e| to_storage_err(e.to_string()))?;
            let rows = stmt
                .query_map([], |row| row.get::<_, String>(0))
                .map_err(|e| to_storage_err(e.to_string()))?;
            let mut out = Vec::new();
            for row in rows {
                out.push(TenantId::from(row.map_err(|e| to_storage_err(e.to_string()))?));
            }
            Ok(out)
        })
    }

    pub fn tenant_exists(&self, tenant_id: &TenantId) -> SsResult<bool> {
        self.pool.readers.with_conn(|conn| {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM tenants WHERE tenant_id = ?1",
                    params![tenant_id.as_str()],
                    |row| row.get(0),
                )
                .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(count > 0)
        })
    }

    pub(crate) fn pool(&self) -> &ConnectionPool {
        &self.pool
    }
}

