//! A vector added under one tenant must never surface in another
//! tenant's search results, even with identical planes-derivation inputs.

mod common;

use base64::Engine as _;
use ss_core::config::SsConfig;
use ss_core::wire::{AddRequest, InitializeRequest, SearchRequest, WireLshConfig};
use ss_lsh::{hash_vector, PlaneSet};
use ss_orchestrator::SearchOrchestrator;

fn init_tenant(orch: &SearchOrchestrator, tenant_id: &str, fixture: &common::ClientFixture) -> PlaneSet {
    let response = orch
        .initialize(InitializeRequest {
            tenant_id: tenant_id.into(),
            context_params: fixture.wire_params.clone(),
            embedding_dim: 4,
            lsh_config: WireLshConfig {
                num_tables: 4,
                hash_size: 4,
                num_candidates: 16,
            },
        })
        .unwrap();
    let plane_bytes = base64::engine::general_purpose::STANDARD
        .decode(&response.random_planes_base64)
        .unwrap();
    PlaneSet::deserialize(&plane_bytes).unwrap()
}

#[test]
fn search_on_one_tenant_never_surfaces_another_tenants_embeddings() {
    let fixture = common::build_client_fixture();
    let orch = SearchOrchestrator::new(SsConfig::default()).unwrap();
    let planes_a = init_tenant(&orch, "tenant-a", &fixture);
    let planes_b = init_tenant(&orch, "tenant-b", &fixture);

    let v = [0.2, 0.4, 0.4, 0.8];
    let codes_a = hash_vector(&planes_a, &v).unwrap();
    orch.add(AddRequest {
        tenant_id: "tenant-a".into(),
        encrypted_embedding_base64: fixture.encrypt_vector(&v),
        lsh_hashes: codes_a,
        metadata: None,
        external_id: None,
    })
    .unwrap();

    let codes_b = hash_vector(&planes_b, &v).unwrap();
    let response_b = orch
        .search(SearchRequest {
            tenant_id: "tenant-b".into(),
            encrypted_query_base64: fixture.encrypt_vector(&v),
            lsh_hashes: codes_b,
            top_k: 5,
            rerank_candidates: None,
            min_matches: Some(0),
        })
        .unwrap();
    assert!(response_b.results.is_empty());
    assert_eq!(response_b.candidates_checked, 0);

    let codes_a_query = hash_vector(&planes_a, &v).unwrap();
    let response_a = orch
        .search(SearchRequest {
            tenant_id: "tenant-a".into(),
            encrypted_query_base64: fixture.encrypt_vector(&v),
            lsh_hashes: codes_a_query,
            top_k: 5,
            rerank_candidates: None,
            min_matches: Some(1),
        })
        .unwrap();
    assert_eq!(response_a.results.len(), 1);
}
