use serde::{Deserialize, Serialize};

use crate::constants;

/// HE context service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeConfig {
    /// CKKS polynomial modulus degree.
    pub poly_modulus_degree: u64,
    /// CKKS coefficient modulus bit schedule.
    pub coeff_modulus_bits: Vec<i32>,
    /// CKKS global scale.
    pub scale: f64,
    /// Maximum number of tenant HE contexts cached in memory at once.
    pub context_cache_size: u64,
    /// Worker thread count for the bounded HE scoring pool.
    pub worker_threads: usize,
}

impl Default for HeConfig {
    fn default() -> Self {
        Self {
            poly_modulus_degree: constants::DEFAULT_POLY_MODULUS_DEGREE,
            coeff_modulus_bits: constants::DEFAULT_COEFF_MODULUS_BITS.to_vec(),
            scale: constants::DEFAULT_SCALE,
            context_cache_size: constants::DEFAULT_HE_CONTEXT_CACHE_SIZE,
            worker_threads: constants::DEFAULT_HE_WORKER_THREADS,
        }
    }
}
