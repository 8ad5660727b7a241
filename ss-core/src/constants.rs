/// Engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default CKKS polynomial modulus degree.
pub const DEFAULT_POLY_MODULUS_DEGREE: u64 = 8192;

/// Default CKKS coefficient modulus bit schedule.
pub const DEFAULT_COEFF_MODULUS_BITS: &[i32] = &[60, 40, 40, 60];

/// Default CKKS global scale, 2^40.
pub const DEFAULT_SCALE: f64 = 1_099_511_627_776.0;

/// Default number of LSH hash tables per tenant.
pub const DEFAULT_LSH_TABLES: usize = 20;

/// Default number of hyperplanes (bits) per LSH table.
pub const DEFAULT_LSH_BITS_PER_TABLE: usize = 16;

/// Maximum embedding vector dimensionality accepted.
pub const MAX_EMBEDDING_DIM: usize = 4096;

/// Maximum number of tenants tracked by the process-wide HE context cache.
pub const DEFAULT_HE_CONTEXT_CACHE_SIZE: u64 = 64;

/// Maximum number of candidates returned from a bucket scan before HE scoring.
pub const DEFAULT_MAX_CANDIDATES: usize = 512;

/// Default worker thread count for the HE scoring pool.
pub const DEFAULT_HE_WORKER_THREADS: usize = 4;

/// Maximum embeddings a single tenant may hold.
pub const DEFAULT_TENANT_EMBEDDING_QUOTA: usize = 1_000_000;
