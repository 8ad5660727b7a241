use std::collections::HashSet;

use dashmap::DashMap;
use ss_core::ids::EmbeddingId;

/// Per-tenant inverted index from `(table_index, hash_value)` to the
/// embedding ids bucketed there. In-memory shape only; the row-per-entry
/// persisted form lives in `ss-storage` and is reconstructed into one of
/// these on recovery.
pub struct LshIndex {
    buckets: DashMap<(usize, u32), HashSet<EmbeddingId>>,
}

impl LshIndex {
    pub fn new() -> Self {
        Self {
            buckets: DashMap::new(),
        }
    }

    /// Insert `embedding_id` into all `T` buckets named by `codes`. Must
    /// be called alongside the matching `CiphertextStore::append` under
    /// the same writer-lock critical section so the two never drift.
    pub fn insert(&self, embedding_id: EmbeddingId, codes: &[u32]) {
        for (table_index, &hash_value) in codes.iter().enumerate() {
            self.buckets
                .entry((table_index, hash_value))
                .or_default()
                .insert(embedding_id);
        }
    }

    /// Remove `embedding_id` from all `T` buckets named by `codes`. Empty
    /// buckets are dropped so bucket cardinality doesn't grow unbounded
    /// under high churn.
    pub fn remove(&self, embedding_id: EmbeddingId, codes: &[u32]) {
        for (table_index, &hash_value) in codes.iter().enumerate() {
            let key = (table_index, hash_value);
            if let Some(mut bucket) = self.buckets.get_mut(&key) {
                bucket.remove(&embedding_id);
                if bucket.is_empty() {
                    drop(bucket);
                    self.buckets.remove(&key);
                }
            }
        }
    }

    pub fn buckets_for(&self, table_index: usize, hash_value: u32) -> Vec<EmbeddingId> {
        self.buckets
            .get(&(table_index, hash_value))
            .map(|b| b.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}

impl Default for LshIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_buckets_for_finds_the_entry() {
        let index = LshIndex::new();
        let id = EmbeddingId::new(1);
        index.insert(id, &[5, 7, 9]);
        assert_eq!(index.buckets_for(0, 5), vec![id]);
        assert_eq!(index.buckets_for(1, 7), vec![id]);
        assert_eq!(index.buckets_for(2, 9), vec![id]);
    }

    #[test]
    fn remove_clears_every_table_entry() {
        let index = LshIndex::new();
        let id = EmbeddingId::new(1);
        index.insert(id, &[5, 7]);
        index.remove(id, &[5, 7]);
        assert!(index.buckets_for(0, 5).is_empty());
        assert!(index.buckets_for(1, 7).is_empty());
        assert_eq!(index.bucket_count(), 0);
    }

    #[test]
    fn remove_only_drops_the_named_embedding_from_a_shared_bucket() {
        let index = LshIndex::new();
        let a = EmbeddingId::new(1);
        let b = EmbeddingId::new(2);
        index.insert(a, &[3]);
        index.insert(b, &[3]);
        index.remove(a, &[3]);
        assert_eq!(index.buckets_for(0, 3), vec![b]);
    }

    #[test]
    fn missing_bucket_returns_empty_vec() {
        let index = LshIndex::new();
        assert!(index.buckets_for(0, 999).is_empty());
    }
}
