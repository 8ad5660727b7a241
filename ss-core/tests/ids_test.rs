use ss_core::{EmbeddingId, TenantId};

#[test]
fn tenant_id_displays_as_its_inner_string() {
    let t = TenantId::new("acme-corp");
    assert_eq!(t.to_string(), "acme-corp");
    assert_eq!(t.as_str(), "acme-corp");
}

#[test]
fn tenant_id_from_str_and_string_agree() {
    let a: TenantId = "acme".into();
    let b: TenantId = "acme".to_string().into();
    assert_eq!(a, b);
}

#[test]
fn embedding_id_ordering_matches_numeric_order() {
    let a = EmbeddingId::new(1);
    let b = EmbeddingId::new(2);
    assert!(a < b);
}

#[test]
fn tenant_id_serde_roundtrip_is_a_bare_string() {
    let t = TenantId::new("tenant-x");
    let json = serde_json::to_string(&t).unwrap();
    assert_eq!(json, "\"tenant-x\"");
    let back: TenantId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, t);
}
