//! Process-wide LRU cache of tenant HE contexts, wrapping `moka`.
//! Contexts are expensive to rebuild
//! from a public key (deserializing the key material, not cryptographic
//! work), so eviction is a memory/latency tradeoff, not a correctness one:
//! a miss just rebuilds from the tenant's persisted `HeContextParams`.

use std::time::Duration;

use moka::sync::Cache;

use crate::context::HeContext;

pub struct HeContextCache {
    cache: Cache<String, HeContext>,
}

impl HeContextCache {
    pub fn new(max_tenants: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_tenants)
            .time_to_idle(Duration::from_secs(3600))
            .build();
        Self { cache }
    }

    pub fn get(&self, tenant_id: &str) -> Option<HeContext> {
        self.cache.get(tenant_id)
    }

    pub fn insert(&self, tenant_id: String, context: HeContext) {
        self.cache.insert(tenant_id, context);
    }

    pub fn invalidate(&self, tenant_id: &str) {
        self.cache.invalidate(tenant_id);
    }

    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
