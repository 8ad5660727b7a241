use std::sync::Arc;

use rusqlite::{params, OptionalExtension};
use ss_core::errors::SsResult;
use ss_core::ids::{EmbeddingId, TenantId};
use ss_core::models::{EmbeddingRecord, HeContextParams, LshEntry, TenantRecord};

use crate::errors::to_storage_err;
use crate::mirror::DurableMirror;

/// Everything needed to repopulate one tenant's in-memory `TenantState`
/// after a restart: the orchestrator applies this wholesale rather than
/// replaying individual `add` calls.
pub struct RecoveredTenant {
    pub tenant: TenantRecord,
    pub he_params: HeContextParams,
    pub plane_blob: Vec<u8>,
    pub embeddings: Vec<EmbeddingRecord>,
    pub lsh_entries: Vec<(EmbeddingId, Vec<LshEntry>)>,
}

/// Scan the three mirror tables for one tenant and assemble the data the
/// orchestrator needs to rebuild its in-memory `TenantState`. Orphan
/// cleanup: an `lsh_entries` row whose embedding has no live `embeddings`
/// row (e.g. the process crashed between the two writes of a non-atomic
/// recovery window) is dropped rather than replayed, and a soft-deleted
/// embedding's `lsh_entries` rows are skipped — deleted embeddings never
/// reappear as search candidates after recovery.
pub fn recover_tenant(mirror: &DurableMirror, tenant_id: &TenantId) -> SsResult<Option<RecoveredTenant>> {
    let pool = mirror.pool();

    let tenant_row = pool.readers.with_conn(|conn| {
        conn.query_row(
            "SELECT embedding_dim, lsh_tables, lsh_bits_per_table, rerank_cap, max_items,
                    poly_modulus_degree, coeff_modulus_bits, scale, public_key_bytes,
                    galois_key_bytes, plane_blob, created_at
             FROM tenants WHERE tenant_id = ?1",
            params![tenant_id.as_str()],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, i64>(3)?,
                    row.get::<_, i64>(4)?,
                    row.get::<_, i64>(5)?,
                    row.get::<_, String>(6)?,
                    row.get::<_, f64>(7)?,
                    row.get::<_, Vec<u8>>(8)?,
                    row.get::<_, Vec<u8>>(9)?,
                    row.get::<_, Vec<u8>>(10)?,
                    row.get::<_, String>(11)?,
                ))
            },
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))
    })?;

    let Some((
        embedding_dim,
        lsh_tables,
        lsh_bits_per_table,
        rerank_cap,
        max_items,
        poly_modulus_degree,
        coeff_modulus_bits_json,
        scale,
        public_key_bytes,
        galois_key_bytes,
        plane_blob,
        created_at,
    )) = tenant_row
    else {
        return Ok(None);
    };

    let coeff_modulus_bits: Vec<i32> =
        serde_json::from_str(&coeff_modulus_bits_json).map_err(|e| to_storage_err(e.to_string()))?;

    let tenant = TenantRecord {
        tenant_id: tenant_id.clone(),
        embedding_dim: embedding_dim as usize,
        lsh_tables: lsh_tables as usize,
        lsh_bits_per_table: lsh_bits_per_table as usize,
        rerank_cap: rerank_cap as usize,
        max_items: max_items as usize,
        created_at: chrono::DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| to_storage_err(e.to_string()))?
            .with_timezone(&chrono::Utc),
    };

    let he_params = HeContextParams {
        tenant_id: tenant_id.clone(),
        poly_modulus_degree: poly_modulus_degree as u64,
        coeff_modulus_bits,
        scale,
        public_key_bytes,
        galois_key_bytes,
    };

    let embeddings: Vec<EmbeddingRecord> = pool.readers.with_conn(|conn| {
        let mut stmt = conn
            .prepare(
                "SELECT embedding_id, external_id, ciphertext, created_at, deleted_at
                 FROM embeddings WHERE tenant_id = ?1 AND deleted_at IS NULL",
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        let rows = stmt
            .query_map(params![tenant_id.as_str()], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, Vec<u8>>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })
            .map_err(|e| to_storage_err(e.to_string()))?;

        let mut out = Vec::new();
        for row in rows {
            let (embedding_id, external_id, ciphertext, created_at) =
                row.map_err(|e| to_storage_err(e.to_string()))?;
            out.push(EmbeddingRecord {
                tenant_id: tenant_id.clone(),
                embedding_id: EmbeddingId::new(embedding_id as u64),
                external_id,
                ciphertext: Arc::from(ciphertext.into_boxed_slice()),
                created_at: chrono::DateTime::parse_from_rfc3339(&created_at)
                    .map_err(|e| to_storage_err(e.to_string()))?
                    .with_timezone(&chrono::Utc),
                deleted: false,
                deleted_at: None,
            });
        }
        Ok(out)
    })?;

    let live_ids: std::collections::HashSet<EmbeddingId> =
        embeddings.iter().map(|e| e.embedding_id).collect();

    let mut entries_by_embedding: std::collections::HashMap<EmbeddingId, Vec<LshEntry>> =
        std::collections::HashMap::new();
    pool.readers.with_conn(|conn| {
        let mut stmt = conn
            .prepare(
                "SELECT embedding_id, table_index, hash_value FROM lsh_entries WHERE tenant_id = ?1",
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        let rows = stmt
            .query_map(params![tenant_id.as_str()], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, u32>(2)?,
                ))
            })
            .map_err(|e| to_storage_err(e.to_string()))?;
        for row in rows {
            let (embedding_id, table_index, hash_value) =
                row.map_err(|e| to_storage_err(e.to_string()))?;
            let embedding_id = EmbeddingId::new(embedding_id as u64);
            // orphaned entry: no live embedding backs it, drop it silently
            if !live_ids.contains(&embedding_id) {
                continue;
            }
            entries_by_embedding
                .entry(embedding_id)
                .or_default()
                .push(LshEntry::new(embedding_id, table_index as usize, hash_value));
        }
        Ok(())
    })?;

    let lsh_entries: Vec<(EmbeddingId, Vec<LshEntry>)> = entries_by_embedding.into_iter().collect();

    Ok(Some(RecoveredTenant {
        tenant,
        he_params,
        plane_blob,
        embeddings,
        lsh_entries,
    }))
}
