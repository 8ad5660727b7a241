use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use ss_core::errors::StoreError;
use ss_core::ids::{EmbeddingId, TenantId};
use ss_core::models::{EmbeddingMetadata, EmbeddingRecord};

/// Per-tenant append structure for ciphertexts and their metadata. Backed
/// by a concurrent map keyed on embedding id; the
/// readers-writer discipline that makes `append` atomic with respect to
/// concurrent `search`es lives one level up, in the tenant's `RwLock`
/// (owned by `ss-orchestrator`), not here.
pub struct CiphertextStore {
    tenant_id: TenantId,
    records: DashMap<EmbeddingId, EmbeddingRecord>,
    metadata: DashMap<EmbeddingId, EmbeddingMetadata>,
    next_id: AtomicU64,
    quota: usize,
}

impl CiphertextStore {
    pub fn new(tenant_id: TenantId, quota: usize) -> Self {
        Self {
            tenant_id,
            records: DashMap::new(),
            metadata: DashMap::new(),
            next_id: AtomicU64::new(0),
            quota,
        }
    }

    pub fn live_count(&self) -> usize {
        self.records.iter().filter(|r| !r.deleted).count()
    }

    /// Allocate the next embedding id without inserting a record. Callers
    /// that also need to write LSH entries (the orchestrator) use this to
    /// get a stable id before touching the index, so the store and index
    /// insert under the same id.
    pub fn reserve_id(&self) -> Result<EmbeddingId, StoreError> {
        if self.live_count() >= self.quota {
            return Err(StoreError::QuotaExceeded {
                tenant_id: self.tenant_id.to_string(),
                used: self.live_count(),
                limit: self.quota,
            });
        }
        Ok(EmbeddingId::new(self.next_id.fetch_add(1, Ordering::SeqCst)))
    }

    pub fn append(
        &self,
        embedding_id: EmbeddingId,
        ciphertext: Arc<[u8]>,
        external_id: Option<String>,
        metadata: Option<EmbeddingMetadata>,
    ) -> Result<(), StoreError> {
        if ciphertext.is_empty() {
            return Err(StoreError::EmptyCiphertext);
        }
        let record = EmbeddingRecord {
            tenant_id: self.tenant_id.clone(),
            embedding_id,
            external_id,
            ciphertext,
            created_at: chrono::Utc::now(),
            deleted: false,
            deleted_at: None,
        };
        self.records.insert(embedding_id, record);
        if let Some(meta) = metadata {
            self.metadata.insert(embedding_id, meta);
        }
        Ok(())
    }

    pub fn lookup(&self, embedding_id: EmbeddingId) -> Option<(Arc<[u8]>, Option<EmbeddingMetadata>)> {
        let record = self.records.get(&embedding_id)?;
        if record.deleted {
            return None;
        }
        let ct = record.ciphertext.clone();
        let meta = self.metadata.get(&embedding_id).map(|m| m.clone());
        Some((ct, meta))
    }

    pub fn soft_delete(&self, embedding_id: EmbeddingId) -> Result<(), StoreError> {
        let mut record =
            self.records
                .get_mut(&embedding_id)
                .ok_or(StoreError::EmbeddingNotFound {
                    tenant_id: self.tenant_id.to_string(),
                    embedding_id: embedding_id.0,
                })?;
        if record.deleted {
            return Err(StoreError::AlreadyDeleted {
                embedding_id: embedding_id.0,
            });
        }
        record.deleted = true;
        record.deleted_at = Some(chrono::Utc::now());
        Ok(())
    }

    /// Physically drop soft-deleted records older than `cutoff`. Called
    /// only by an external caller (operator tooling or a scheduled job);
    /// this crate runs no background task of its own.
    pub fn purge_deleted(&self, cutoff: chrono::DateTime<chrono::Utc>) -> Vec<EmbeddingId> {
        let to_purge: Vec<EmbeddingId> = self
            .records
            .iter()
            .filter(|r| r.deleted && r.deleted_at.map(|d| d < cutoff).unwrap_or(false))
            .map(|r| r.embedding_id)
            .collect();
        for id in &to_purge {
            self.records.remove(id);
            self.metadata.remove(id);
        }
        to_purge
    }

    pub fn all_live_ids(&self) -> Vec<EmbeddingId> {
        self.records
            .iter()
            .filter(|r| !r.deleted)
            .map(|r| r.embedding_id)
            .collect()
    }

    /// Insert a record recovered from the durable mirror verbatim,
    /// preserving its `embedding_id` and `deleted` state rather than
    /// allocating a fresh id. Advances the id counter so subsequent
    /// `reserve_id` calls never collide with a recovered id.
    pub fn restore(&self, record: EmbeddingRecord) {
        let embedding_id = record.embedding_id;
        self.next_id.fetch_max(embedding_id.0 + 1, Ordering::SeqCst);
        self.records.insert(embedding_id, record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ct(bytes: &[u8]) -> Arc<[u8]> {
        Arc::from(bytes.to_vec().into_boxed_slice())
    }

    #[test]
    fn append_then_lookup_returns_the_ciphertext() {
        let store = CiphertextStore::new("tenant-a".into(), 10);
        let id = store.reserve_id().unwrap();
        store
            .append(id, ct(b"hello"), None, None)
            .unwrap();
        let (bytes, _) = store.lookup(id).unwrap();
        assert_eq!(&*bytes, b"hello");
    }

    #[test]
    fn soft_deleted_records_are_hidden_from_lookup() {
        let store = CiphertextStore::new("tenant-a".into(), 10);
        let id = store.reserve_id().unwrap();
        store
            .append(id, ct(b"hello"), None, None)
            .unwrap();
        store.soft_delete(id).unwrap();
        assert!(store.lookup(id).is_none());
    }

    #[test]
    fn soft_deleting_twice_is_an_error() {
        let store = CiphertextStore::new("tenant-a".into(), 10);
        let id = store.reserve_id().unwrap();
        store
            .append(id, ct(b"x"), None, None)
            .unwrap();
        store.soft_delete(id).unwrap();
        assert!(store.soft_delete(id).is_err());
    }

    #[test]
    fn reserve_id_rejects_once_quota_is_reached() {
        let store = CiphertextStore::new("tenant-a".into(), 1);
        let id = store.reserve_id().unwrap();
        store
            .append(id, ct(b"x"), None, None)
            .unwrap();
        assert!(store.reserve_id().is_err());
    }

    #[test]
    fn empty_ciphertext_is_rejected() {
        let store = CiphertextStore::new("tenant-a".into(), 10);
        let id = store.reserve_id().unwrap();
        let result = store.append(id, ct(b""), None, None);
        assert!(matches!(result, Err(StoreError::EmptyCiphertext)));
    }

    #[test]
    fn purge_deleted_removes_only_records_past_the_cutoff() {
        let store = CiphertextStore::new("tenant-a".into(), 10);
        let id = store.reserve_id().unwrap();
        store
            .append(id, ct(b"x"), None, None)
            .unwrap();
        store.soft_delete(id).unwrap();

        let future_cutoff = chrono::Utc::now() + chrono::Duration::seconds(60);
        let purged = store.purge_deleted(future_cutoff);
        assert_eq!(purged, vec![id]);
        assert!(store.records.get(&id).is_none());
    }
}
