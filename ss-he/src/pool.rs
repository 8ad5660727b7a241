use std::sync::Arc;

use rayon::ThreadPool;
use seal_fhe::Ciphertext;
use ss_core::errors::ContextError;

use crate::context::HeContext;

/// Bounded worker pool for HE scoring, built once per process. Keeping a
/// dedicated `rayon` pool (rather than using the global one) means a
/// search's candidate scoring never competes with or starves other
/// CPU-bound work elsewhere in the process for a turn.
pub struct HeWorkerPool {
    pool: Arc<ThreadPool>,
}

impl HeWorkerPool {
    pub fn new(num_threads: usize) -> Result<Self, ContextError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("ss-he-worker-{i}"))
            .build()
            .map_err(|e| ContextError::BuildFailed {
                reason: format!("failed to build HE worker pool: {e}"),
            })?;
        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Score `query_ct` against every stored ciphertext in `stored_cts`,
    /// using this pool's bounded thread count. Order of results matches
    /// the order of `stored_cts`.
    pub fn score_candidates(
        &self,
        context: &HeContext,
        query_ct: &Ciphertext,
        stored_cts: &[Ciphertext],
    ) -> Vec<Result<Vec<u8>, ContextError>> {
        self.pool.install(|| {
            use rayon::prelude::*;
            stored_cts
                .par_iter()
                .map(|stored| context.inner_product(query_ct, stored))
                .collect()
        })
    }
}
