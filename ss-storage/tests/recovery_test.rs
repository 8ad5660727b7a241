use std::sync::Arc;

use ss_core::ids::EmbeddingId;
use ss_core::models::{EmbeddingRecord, HeContextParams, LshEntry, TenantRecord};
use ss_storage::{recover_tenant, DurableMirror};

fn sample_tenant(tenant_id: &str) -> (TenantRecord, HeContextParams, Vec<u8>) {
    let tenant = TenantRecord {
        tenant_id: tenant_id.into(),
        embedding_dim: 8,
        lsh_tables: 2,
        lsh_bits_per_table: 4,
        rerank_cap: 50,
        max_items: 1000,
        created_at: chrono::Utc::now(),
    };
    let he_params = HeContextParams {
        tenant_id: tenant_id.into(),
        poly_modulus_degree: 8192,
        coeff_modulus_bits: vec![60, 40, 40, 60],
        scale: 2f64.powi(40),
        public_key_bytes: vec![9, 9, 9],
        galois_key_bytes: vec![8, 8, 8],
    };
    (tenant, he_params, vec![1, 2, 3, 4])
}

#[test]
fn recover_tenant_returns_none_for_unknown_tenant() {
    let mirror = DurableMirror::open_in_memory(2).unwrap();
    let result = recover_tenant(&mirror, &"ghost-tenant".into()).unwrap();
    assert!(result.is_none());
}

#[test]
fn recover_tenant_rebuilds_tenant_embeddings_and_lsh_entries() {
    let mirror = DurableMirror::open_in_memory(2).unwrap();
    let (tenant, he_params, plane_blob) = sample_tenant("tenant-recover");
    mirror.write_tenant(&tenant, &he_params, &plane_blob).unwrap();

    let embedding_id = EmbeddingId::new(0);
    let record = EmbeddingRecord {
        tenant_id: "tenant-recover".into(),
        embedding_id,
        external_id: Some("ext-1".into()),
        ciphertext: Arc::from(vec![7u8; 16].into_boxed_slice()),
        created_at: chrono::Utc::now(),
        deleted: false,
        deleted_at: None,
    };
    mirror.write_embedding(&record).unwrap();

    let entries = vec![
        LshEntry::new(embedding_id, 0, 3),
        LshEntry::new(embedding_id, 1, 9),
    ];
    mirror
        .write_lsh_entries(&"tenant-recover".into(), embedding_id, &entries)
        .unwrap();

    let recovered = recover_tenant(&mirror, &"tenant-recover".into())
        .unwrap()
        .expect("tenant should be recoverable");

    assert_eq!(recovered.tenant.embedding_dim, 8);
    assert_eq!(recovered.plane_blob, plane_blob);
    assert_eq!(recovered.embeddings.len(), 1);
    assert_eq!(recovered.embeddings[0].external_id.as_deref(), Some("ext-1"));
    assert_eq!(recovered.lsh_entries.len(), 1);
    assert_eq!(recovered.lsh_entries[0].1.len(), 2);
}

#[test]
fn soft_deleted_embeddings_are_excluded_from_recovery() {
    let mirror = DurableMirror::open_in_memory(2).unwrap();
    let (tenant, he_params, plane_blob) = sample_tenant("tenant-soft-delete");
    mirror.write_tenant(&tenant, &he_params, &plane_blob).unwrap();

    let embedding_id = EmbeddingId::new(0);
    let record = EmbeddingRecord {
        tenant_id: "tenant-soft-delete".into(),
        embedding_id,
        external_id: None,
        ciphertext: Arc::from(vec![1u8; 4].into_boxed_slice()),
        created_at: chrono::Utc::now(),
        deleted: false,
        deleted_at: None,
    };
    mirror.write_embedding(&record).unwrap();
    mirror
        .write_lsh_entries(&"tenant-soft-delete".into(), embedding_id, &[LshEntry::new(embedding_id, 0, 1)])
        .unwrap();
    mirror
        .mark_embedding_deleted(&"tenant-soft-delete".into(), embedding_id, chrono::Utc::now())
        .unwrap();

    let recovered = recover_tenant(&mirror, &"tenant-soft-delete".into())
        .unwrap()
        .unwrap();
    assert!(recovered.embeddings.is_empty());
    // the orphaned lsh_entries row (embedding now soft-deleted) is dropped, not replayed
    assert!(recovered.lsh_entries.is_empty());
}
