use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use ss_core::ids::EmbeddingId;
use ss_core::models::{EmbeddingMetadata, EmbeddingRecord, HeContextParams, LshEntry, TenantRecord};
use ss_lsh::PlaneSet;
use ss_store::{CiphertextStore, LshIndex};

/// One tenant's owned state. `planes` and `he_params` are fixed at
/// `initialize` and never mutated again, so they live outside the lock;
/// `store`, `index`, and the external-id dedup map are gated together
/// behind a single readers-writer lock: `search`/`stats` take the read
/// guard, `add`/`teardown` take the write guard.
///
/// `std::sync::RwLock` rather than `parking_lot::RwLock`: no critical
/// section here ever suspends across an await point, and `parking_lot`
/// is not a dependency anywhere else in this workspace.
pub struct TenantState {
    pub tenant: TenantRecord,
    pub planes: PlaneSet,
    pub he_params: HeContextParams,
    inner: RwLock<TenantInner>,
    tearing_down: AtomicBool,
    last_active_millis: AtomicI64,
}

struct TenantInner {
    store: CiphertextStore,
    index: LshIndex,
    external_ids: HashMap<String, EmbeddingId>,
    /// Hash codes recorded per embedding, needed to clean the matching
    /// index buckets when an embedding is physically purged.
    codes_by_embedding: HashMap<EmbeddingId, Vec<u32>>,
}

/// One successful insert: the allocated id and whether it reused an
/// existing record via `external_id` idempotency.
pub struct InsertOutcome {
    pub embedding_id: EmbeddingId,
    pub duplicate: bool,
}

impl TenantState {
    pub fn new(tenant: TenantRecord, planes: PlaneSet, he_params: HeContextParams) -> Self {
        let quota = tenant.max_items;
        let tenant_id = tenant.tenant_id.clone();
        Self {
            tenant,
            planes,
            he_params,
            inner: RwLock::new(TenantInner {
                store: CiphertextStore::new(tenant_id, quota),
                index: LshIndex::new(),
                external_ids: HashMap::new(),
                codes_by_embedding: HashMap::new(),
            }),
            tearing_down: AtomicBool::new(false),
            last_active_millis: AtomicI64::new(Utc::now().timestamp_millis()),
        }
    }

    pub fn is_tearing_down(&self) -> bool {
        self.tearing_down.load(Ordering::SeqCst)
    }

    pub fn mark_tearing_down(&self) {
        self.tearing_down.store(true, Ordering::SeqCst);
    }

    pub fn touch(&self) {
        self.last_active_millis
            .store(Utc::now().timestamp_millis(), Ordering::Relaxed);
    }

    pub fn last_active(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.last_active_millis.load(Ordering::Relaxed))
            .unwrap_or_else(Utc::now)
    }

    /// Insert a new embedding, or return the existing one if `external_id`
    /// already names a live record for this tenant. Store append and
    /// index insert happen under the same write guard, so the two
    /// structures never drift relative to each other.
    pub fn insert(
        &self,
        ciphertext: std::sync::Arc<[u8]>,
        codes: Vec<u32>,
        external_id: Option<String>,
        metadata_fields: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> Result<InsertOutcome, ss_core::errors::SsError> {
        let mut guard = self.inner.write().map_err(lock_poisoned)?;

        if let Some(ext) = external_id.as_deref() {
            if let Some(&existing) = guard.external_ids.get(ext) {
                return Ok(InsertOutcome {
                    embedding_id: existing,
                    duplicate: true,
                });
            }
        }

        let embedding_id = guard.store.reserve_id()?;
        let metadata = metadata_fields.map(|fields| EmbeddingMetadata { embedding_id, fields });
        guard
            .store
            .append(embedding_id, ciphertext, external_id.clone(), metadata)?;
        guard.index.insert(embedding_id, &codes);
        guard.codes_by_embedding.insert(embedding_id, codes);
        if let Some(ext) = external_id {
            guard.external_ids.insert(ext, embedding_id);
        }

        Ok(InsertOutcome {
            embedding_id,
            duplicate: false,
        })
    }

    pub fn live_count(&self) -> Result<usize, ss_core::errors::SsError> {
        Ok(self.inner.read().map_err(lock_poisoned)?.store.live_count())
    }

    pub fn bucket_count(&self) -> Result<usize, ss_core::errors::SsError> {
        Ok(self.inner.read().map_err(lock_poisoned)?.index.bucket_count())
    }

    /// Run `f` against a read guard over the store and index together,
    /// used by `search` to select candidates and fetch their ciphertexts
    /// from one consistent snapshot.
    pub fn with_read<T>(
        &self,
        f: impl FnOnce(&CiphertextStore, &LshIndex) -> T,
    ) -> Result<T, ss_core::errors::SsError> {
        let guard = self.inner.read().map_err(lock_poisoned)?;
        Ok(f(&guard.store, &guard.index))
    }

    /// Physically drop soft-deleted records past `cutoff`, cleaning their
    /// index buckets too. Runs under the write guard since it mutates
    /// both structures.
    pub fn purge_deleted(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<EmbeddingId>, ss_core::errors::SsError> {
        let mut guard = self.inner.write().map_err(lock_poisoned)?;
        let purged = guard.store.purge_deleted(cutoff);
        for id in &purged {
            if let Some(codes) = guard.codes_by_embedding.remove(id) {
                guard.index.remove(*id, &codes);
            }
        }
        Ok(purged)
    }

    /// Soft-delete one embedding, hiding it from future `search`/`lookup`
    /// without touching its index entries (those are cleaned lazily, by
    /// `purge_deleted`).
    pub fn soft_delete(&self, embedding_id: EmbeddingId) -> Result<(), ss_core::errors::SsError> {
        let guard = self.inner.write().map_err(lock_poisoned)?;
        guard.store.soft_delete(embedding_id)?;
        Ok(())
    }

    /// Rebuild a tenant's in-memory state wholesale from what
    /// `ss_storage::recover_tenant` scanned out of the durable mirror,
    /// rather than replaying individual `add` calls. Orphaned
    /// `lsh_entries` were already dropped by `recover_tenant`; any
    /// embedding left with fewer than `lsh_tables` entries is excluded
    /// from the index (its remaining codes cannot be trusted) per the
    /// orphan-cleanup rule — hashing requires the plaintext vector, which
    /// recovery never has.
    pub fn from_recovered(
        tenant: TenantRecord,
        planes: PlaneSet,
        he_params: HeContextParams,
        embeddings: Vec<EmbeddingRecord>,
        lsh_entries: Vec<(EmbeddingId, Vec<LshEntry>)>,
    ) -> Self {
        let lsh_tables = tenant.lsh_tables;
        let state = Self::new(tenant, planes, he_params);
        let mut entries_by_id: HashMap<EmbeddingId, Vec<LshEntry>> =
            lsh_entries.into_iter().collect();

        let mut guard = state.inner.write().expect("fresh lock cannot be poisoned");
        for record in embeddings {
            let embedding_id = record.embedding_id;
            let external_id = record.external_id.clone();
            guard.store.restore(record);

            if let Some(entries) = entries_by_id.remove(&embedding_id) {
                if entries.len() == lsh_tables {
                    let mut codes = vec![0u32; lsh_tables];
                    for entry in &entries {
                        codes[entry.table_index] = entry.hash_value;
                    }
                    guard.index.insert(embedding_id, &codes);
                    guard.codes_by_embedding.insert(embedding_id, codes);
                }
            }
            if let Some(ext) = external_id {
                guard.external_ids.insert(ext, embedding_id);
            }
        }
        drop(guard);
        state
    }
}

fn lock_poisoned<E: std::fmt::Display>(e: E) -> ss_core::errors::SsError {
    ss_core::errors::SsError::Storage(format!("tenant state lock poisoned: {e}"))
}
