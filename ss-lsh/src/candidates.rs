use std::collections::HashMap;

use ss_core::ids::EmbeddingId;

/// A lookup from `(table_index, hash_value)` to the embedding ids bucketed
/// there. The orchestrator owns the real index (`ss-store::LshIndex`);
/// this trait lets `find_candidates` stay free of that crate's storage
/// details and of any lock discipline.
pub trait BucketLookup {
    fn bucket(&self, table_index: usize, hash_value: u32) -> Vec<EmbeddingId>;
}

impl<F> BucketLookup for F
where
    F: Fn(usize, u32) -> Vec<EmbeddingId>,
{
    fn bucket(&self, table_index: usize, hash_value: u32) -> Vec<EmbeddingId> {
        self(table_index, hash_value)
    }
}

/// Union candidate buckets across all `T` tables, counting how many
/// tables each embedding id matched in, keep those at or above
/// `min_matches`, then truncate to `cap` preferring higher match counts
/// and lower embedding ids as a stable tie-break.
pub fn find_candidates(
    query_codes: &[u32],
    index: &impl BucketLookup,
    min_matches: u32,
    cap: Option<usize>,
) -> Vec<EmbeddingId> {
    let mut match_counts: HashMap<EmbeddingId, u32> = HashMap::new();
    for (table_index, &hash_value) in query_codes.iter().enumerate() {
        for id in index.bucket(table_index, hash_value) {
            *match_counts.entry(id).or_insert(0) += 1;
        }
    }

    let mut candidates: Vec<(EmbeddingId, u32)> = match_counts
        .into_iter()
        .filter(|&(_, matches)| matches >= min_matches)
        .collect();

    candidates.sort_by(|(id_a, matches_a), (id_b, matches_b)| {
        matches_b.cmp(matches_a).then(id_a.cmp(id_b))
    });

    if let Some(cap) = cap {
        candidates.truncate(cap);
    }

    candidates.into_iter().map(|(id, _)| id).collect()
}
