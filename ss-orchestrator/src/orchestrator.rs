use std::sync::Arc;
use std::time::Instant;

use base64::Engine as _;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use ss_core::config::SsConfig;
use ss_core::errors::{OrchestratorError, TenantError, ValidationError};
use ss_core::ids::{EmbeddingId, TenantId};
use ss_core::models::{HeContextParams, TenantRecord};
use ss_core::wire::{
    AddRequest, AddResponse, AddStatus, InitializeRequest, InitializeResponse, SearchRequest,
    SearchResponse, SearchResultItem, WireLshConfig,
};
use ss_core::{SsError, SsResult};
use ss_he::{HeContext, HeContextCache, HeWorkerPool};
use ss_lsh::{find_candidates, PlaneSet};
use ss_storage::{recover_tenant, DurableMirror};
use tracing::{debug, info, instrument, warn};

use crate::tenant_state::TenantState;

/// Point-in-time counts for one tenant, never carrying plaintext content.
#[derive(Debug, Clone)]
pub struct TenantStats {
    pub tenant_id: TenantId,
    pub live_embeddings: usize,
    pub bucket_count: usize,
    pub last_active: DateTime<Utc>,
}

/// The public face of the engine: tenant lifecycle, `add`, and `search`,
/// coordinating the HE context service, LSH service, ciphertext store,
/// and (optionally) the durable mirror. A concurrent registry maps
/// `TenantId` to an `Arc<TenantState>`, so each tenant's data and locking
/// are fully independent of every other tenant's.
pub struct SearchOrchestrator {
    config: SsConfig,
    server_id: String,
    tenants: DashMap<TenantId, Arc<TenantState>>,
    he_cache: HeContextCache,
    he_pool: HeWorkerPool,
    mirror: Option<DurableMirror>,
}

impl SearchOrchestrator {
    /// Build an orchestrator with in-memory-only tenant state. Process
    /// restarts lose all tenants; use [`Self::with_mirror`] for durability.
    pub fn new(config: SsConfig) -> SsResult<Self> {
        Self::build(config, None)
    }

    /// Build an orchestrator backed by a durable mirror. Call
    /// [`Self::recover_all`] after construction to repopulate tenants from
    /// a prior run.
    pub fn with_mirror(config: SsConfig, mirror: DurableMirror) -> SsResult<Self> {
        Self::build(config, Some(mirror))
    }

    fn build(config: SsConfig, mirror: Option<DurableMirror>) -> SsResult<Self> {
        let he_cache = HeContextCache::new(config.he.context_cache_size);
        let he_pool = HeWorkerPool::new(config.he.worker_threads)?;
        Ok(Self {
            config,
            server_id: format!("ss-orchestrator-{}", ss_core::constants::VERSION),
            tenants: DashMap::new(),
            he_cache,
            he_pool,
            mirror,
        })
    }

    /// Rebuild every tenant known to the durable mirror into in-memory
    /// state, replaying no individual `add` calls — just the three tables'
    /// current contents. Returns the number of tenants recovered.
    #[instrument(skip(self))]
    pub fn recover_all(&self) -> SsResult<usize> {
        let Some(mirror) = &self.mirror else {
            return Ok(0);
        };
        let mut recovered_count = 0;
        for tenant_id in mirror.list_tenant_ids()? {
            if let Some(recovered) = recover_tenant(mirror, &tenant_id)? {
                let planes = PlaneSet::deserialize(&recovered.plane_blob)?;
                let state = TenantState::from_recovered(
                    recovered.tenant,
                    planes,
                    recovered.he_params,
                    recovered.embeddings,
                    recovered.lsh_entries,
                );
                self.tenants.insert(tenant_id.clone(), Arc::new(state));
                recovered_count += 1;
                info!(%tenant_id, "tenant recovered from durable mirror");
            }
        }
        Ok(recovered_count)
    }

    fn tenant(&self, tenant_id: &TenantId) -> SsResult<Arc<TenantState>> {
        let entry = self
            .tenants
            .get(tenant_id)
            .ok_or_else(|| TenantError::NotInitialized {
                tenant_id: tenant_id.to_string(),
            })?;
        if entry.is_tearing_down() {
            return Err(TenantError::TearingDown {
                tenant_id: tenant_id.to_string(),
            }
            .into());
        }
        Ok(Arc::clone(&entry))
    }

    fn context_for(&self, state: &TenantState) -> SsResult<HeContext> {
        let tenant_id = state.tenant.tenant_id.as_str();
        if let Some(ctx) = self.he_cache.get(tenant_id) {
            return Ok(ctx);
        }
        debug!(tenant_id, "HE context cache miss, rebuilding from public params");
        let ctx = HeContext::create(&state.he_params)?;
        self.he_cache.insert(tenant_id.to_string(), ctx.clone());
        Ok(ctx)
    }

    /// Register a new tenant: build and cache its HE context, derive its
    /// LSH planes deterministically from `tenant_id`, and allocate an
    /// empty store and index.
    #[instrument(skip(self, request), fields(tenant_id = %request.tenant_id))]
    pub fn initialize(&self, request: InitializeRequest) -> SsResult<InitializeResponse> {
        let tenant_id = request.tenant_id.clone();
        if tenant_id.as_str().is_empty() {
            return Err(ValidationError::EmptyTenantId.into());
        }
        if request.embedding_dim == 0 {
            return Err(ValidationError::ZeroDimension.into());
        }
        if request.embedding_dim > ss_core::constants::MAX_EMBEDDING_DIM {
            return Err(ValidationError::DimensionTooLarge {
                dim: request.embedding_dim,
                max_dim: ss_core::constants::MAX_EMBEDDING_DIM,
            }
            .into());
        }
        if self.tenants.contains_key(&tenant_id) {
            return Err(TenantError::AlreadyInitialized {
                tenant_id: tenant_id.to_string(),
            }
            .into());
        }

        let public_key_bytes = decode_base64(&request.context_params.public_key_base64)?;
        let galois_key_bytes = decode_base64(&request.context_params.galois_keys_base64)?;
        let he_params = HeContextParams {
            tenant_id: tenant_id.clone(),
            poly_modulus_degree: request.context_params.poly_modulus_degree,
            coeff_modulus_bits: self.config.he.coeff_modulus_bits.clone(),
            scale: request.context_params.scale,
            public_key_bytes,
            galois_key_bytes,
        };
        let context = HeContext::create(&he_params)?;

        let planes = PlaneSet::generate(
            &tenant_id,
            request.lsh_config.num_tables,
            request.lsh_config.hash_size,
            request.embedding_dim,
        )?;
        let plane_bytes = planes.serialize();

        let tenant = TenantRecord {
            tenant_id: tenant_id.clone(),
            embedding_dim: request.embedding_dim,
            lsh_tables: request.lsh_config.num_tables,
            lsh_bits_per_table: request.lsh_config.hash_size,
            rerank_cap: request.lsh_config.num_candidates,
            max_items: self.config.store.embedding_quota,
            created_at: Utc::now(),
        };

        if let Some(mirror) = &self.mirror {
            mirror.write_tenant(&tenant, &he_params, &plane_bytes)?;
        }

        self.he_cache.insert(tenant_id.to_string(), context);
        let lsh_config = request.lsh_config.clone();
        let state = TenantState::new(tenant.clone(), planes, he_params);
        self.tenants.insert(tenant_id.clone(), Arc::new(state));

        info!(%tenant_id, dim = tenant.embedding_dim, "tenant initialized");

        Ok(InitializeResponse {
            tenant_id,
            server_id: self.server_id.clone(),
            max_db_size: tenant.max_items,
            supported_operations: vec![
                "add".to_string(),
                "search".to_string(),
                "stats".to_string(),
                "teardown".to_string(),
            ],
            lsh_config,
            random_planes_base64: base64::engine::general_purpose::STANDARD.encode(plane_bytes),
        })
    }

    /// Append one ciphertext and its hash codes. Store append and index
    /// insert happen atomically (single write guard); if `external_id` is
    /// already present for this tenant, returns the existing record with
    /// `status: duplicate` instead of inserting a second one.
    #[instrument(skip(self, request), fields(tenant_id = %request.tenant_id))]
    pub fn add(&self, request: AddRequest) -> SsResult<AddResponse> {
        let state = self.tenant(&request.tenant_id)?;
        state.touch();

        if request.lsh_hashes.len() != state.tenant.lsh_tables {
            return Err(ValidationError::HashCodeCountMismatch {
                expected: state.tenant.lsh_tables,
                actual: request.lsh_hashes.len(),
            }
            .into());
        }
        check_hash_values_in_range(&request.lsh_hashes, state.tenant.lsh_bits_per_table)?;
        let ciphertext = decode_base64(&request.encrypted_embedding_base64)?;
        let external_id = request.external_id.clone();

        let outcome = state.insert(
            Arc::from(ciphertext.into_boxed_slice()),
            request.lsh_hashes.clone(),
            request.external_id,
            request.metadata,
        )?;

        if !outcome.duplicate {
            if let Some(mirror) = &self.mirror {
                let (ciphertext, _) = state
                    .with_read(|store, _| store.lookup(outcome.embedding_id))?
                    .ok_or_else(|| SsError::Storage("just-inserted embedding vanished".into()))?;
                let record = ss_core::models::EmbeddingRecord {
                    tenant_id: request.tenant_id.clone(),
                    embedding_id: outcome.embedding_id,
                    external_id,
                    ciphertext,
                    created_at: Utc::now(),
                    deleted: false,
                    deleted_at: None,
                };
                mirror.write_embedding(&record)?;
                let entries: Vec<_> = request
                    .lsh_hashes
                    .iter()
                    .enumerate()
                    .map(|(table_index, &hash_value)| {
                        ss_core::models::LshEntry::new(outcome.embedding_id, table_index, hash_value)
                    })
                    .collect();
                mirror.write_lsh_entries(&request.tenant_id, outcome.embedding_id, &entries)?;
            }
        }

        Ok(AddResponse {
            embedding_id: outcome.embedding_id,
            index_position: outcome.embedding_id.0 as usize,
            status: if outcome.duplicate {
                AddStatus::Duplicate
            } else {
                AddStatus::Ok
            },
        })
    }

    /// Select LSH candidates, score survivors under encryption, and return
    /// them unranked — the server never sees a decrypted score, so it
    /// cannot sort by similarity itself.
    #[instrument(skip(self, request), fields(tenant_id = %request.tenant_id))]
    pub fn search(&self, request: SearchRequest) -> SsResult<SearchResponse> {
        let started = Instant::now();
        let state = self.tenant(&request.tenant_id)?;
        state.touch();

        if request.top_k == 0 {
            return Err(ValidationError::ZeroTopK.into());
        }
        if request.lsh_hashes.len() != state.tenant.lsh_tables {
            return Err(ValidationError::HashCodeCountMismatch {
                expected: state.tenant.lsh_tables,
                actual: request.lsh_hashes.len(),
            }
            .into());
        }
        check_hash_values_in_range(&request.lsh_hashes, state.tenant.lsh_bits_per_table)?;
        let rerank_cap = request.rerank_candidates.unwrap_or(state.tenant.rerank_cap);
        if request.top_k > rerank_cap {
            return Err(ValidationError::TopKExceedsRerankCap {
                top_k: request.top_k,
                rerank_cap,
            }
            .into());
        }
        let min_matches = request
            .min_matches
            .unwrap_or(self.config.orchestrator.default_min_matches);
        if min_matches as usize > state.tenant.lsh_tables {
            return Err(OrchestratorError::MinMatchesOutOfRange {
                min_matches,
                table_count: state.tenant.lsh_tables,
            }
            .into());
        }

        if state.live_count()? == 0 {
            return Ok(SearchResponse {
                results: vec![],
                candidates_checked: 0,
                search_time_ms: elapsed_ms(started),
            });
        }

        let query_bytes = decode_base64(&request.encrypted_query_base64)?;

        let (all_candidates, fetched) = state.with_read(|store, index| {
            let lookup = |table_index: usize, hash_value: u32| index.buckets_for(table_index, hash_value);
            let candidates = find_candidates(&request.lsh_hashes, &lookup, min_matches, None);
            let mut checked = Vec::with_capacity(candidates.len().min(rerank_cap));
            for &embedding_id in candidates.iter().take(rerank_cap) {
                match store.lookup(embedding_id) {
                    Some((ciphertext, metadata)) => checked.push((embedding_id, ciphertext, metadata)),
                    None => {
                        // Index entry survives a soft delete / lingers past a
                        // race with an in-flight purge; self-heal happens in
                        // `purge_deleted`, this request just skips it.
                        debug!(%embedding_id, "candidate has no live ciphertext, skipping");
                    }
                }
            }
            (candidates.len(), checked)
        })?;

        let candidates_checked = fetched.len();
        let mut results = Vec::with_capacity(candidates_checked);

        if !fetched.is_empty() {
            let context = self.context_for(&state)?;
            let query_ct = context.deserialize_ciphertext(&query_bytes)?;
            let stored_cts: Vec<_> = fetched
                .iter()
                .map(|(_, ciphertext, _)| context.deserialize_ciphertext(ciphertext))
                .collect::<Result<_, _>>()?;

            let scores = self.he_pool.score_candidates(&context, &query_ct, &stored_cts);
            for ((embedding_id, _, metadata), score) in fetched.into_iter().zip(scores) {
                match score {
                    Ok(encrypted_score) => results.push(SearchResultItem {
                        embedding_id,
                        encrypted_similarity_base64: base64::engine::general_purpose::STANDARD
                            .encode(encrypted_score),
                        metadata: metadata.map(|m| m.fields),
                    }),
                    Err(err) => {
                        // Per-candidate HE failures never abort the whole
                        // search; the candidate is dropped and logged.
                        warn!(%embedding_id, error = %err, "HE scoring failed for candidate, skipping");
                    }
                }
            }
        }

        info!(
            tenant_id = %request.tenant_id,
            candidates_found = all_candidates,
            candidates_checked,
            results = results.len(),
            "search completed"
        );

        Ok(SearchResponse {
            results,
            candidates_checked,
            search_time_ms: elapsed_ms(started),
        })
    }

    #[instrument(skip(self))]
    pub fn stats(&self, tenant_id: &TenantId) -> SsResult<TenantStats> {
        let state = self.tenant(tenant_id)?;
        Ok(TenantStats {
            tenant_id: tenant_id.clone(),
            live_embeddings: state.live_count()?,
            bucket_count: state.bucket_count()?,
            last_active: state.last_active(),
        })
    }

    /// Free a tenant's HE context, planes, store, and index atomically.
    /// Subsequent requests for `tenant_id` fail with `TenantError::NotInitialized`.
    /// Persisted mirror rows are left in place — the narrow mirror runs no
    /// compaction job; an operator-invoked purge handles that separately.
    #[instrument(skip(self))]
    pub fn teardown(&self, tenant_id: &TenantId) -> SsResult<()> {
        let state = self.tenant(tenant_id)?;
        state.mark_tearing_down();
        self.tenants.remove(tenant_id);
        self.he_cache.invalidate(tenant_id.as_str());
        info!(%tenant_id, "tenant torn down");
        Ok(())
    }

    /// Soft-delete one embedding, marking it for later reclamation by
    /// `purge_deleted` without removing it immediately.
    pub fn delete_embedding(&self, tenant_id: &TenantId, embedding_id: EmbeddingId) -> SsResult<()> {
        let state = self.tenant(tenant_id)?;
        state.soft_delete(embedding_id)?;
        if let Some(mirror) = &self.mirror {
            mirror.mark_embedding_deleted(tenant_id, embedding_id, Utc::now())?;
        }
        Ok(())
    }

    /// Maintenance hook for an external scheduler: physically remove
    /// embeddings soft-deleted before `older_than`. No background task
    /// runs inside this crate to call it automatically.
    pub fn purge_deleted(
        &self,
        tenant_id: &TenantId,
        older_than: DateTime<Utc>,
    ) -> SsResult<Vec<EmbeddingId>> {
        let state = self.tenant(tenant_id)?;
        state.purge_deleted(older_than)
    }
}

fn decode_base64(payload: &str) -> SsResult<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| ValidationError::MalformedBase64 { reason: e.to_string() }.into())
}

fn check_hash_values_in_range(hashes: &[u32], bits: usize) -> SsResult<()> {
    let limit = 1u64 << bits;
    for &value in hashes {
        if value as u64 >= limit {
            return Err(ValidationError::HashValueOutOfRange {
                value,
                bits: bits as u32,
            }
            .into());
        }
    }
    Ok(())
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}
