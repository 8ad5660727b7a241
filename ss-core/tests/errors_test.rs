use ss_core::errors::*;

#[test]
fn context_error_not_found_carries_tenant_id() {
    let err = ContextError::NotFound {
        tenant_id: "tenant-a".into(),
    };
    assert!(err.to_string().contains("tenant-a"));
}

#[test]
fn context_error_noise_exhausted_carries_operation_count() {
    let err = ContextError::NoiseBudgetExhausted { operations: 12 };
    assert!(err.to_string().contains("12"));
}

#[test]
fn lsh_error_dimension_mismatch_carries_both_values() {
    let err = LshError::DimensionMismatch {
        expected: 384,
        actual: 128,
    };
    let msg = err.to_string();
    assert!(msg.contains("384"));
    assert!(msg.contains("128"));
}

#[test]
fn store_error_quota_exceeded_carries_tenant_and_counts() {
    let err = StoreError::QuotaExceeded {
        tenant_id: "tenant-b".into(),
        used: 1000,
        limit: 1000,
    };
    let msg = err.to_string();
    assert!(msg.contains("tenant-b"));
    assert!(msg.contains("1000"));
}

#[test]
fn orchestrator_error_min_matches_out_of_range_carries_values() {
    let err = OrchestratorError::MinMatchesOutOfRange {
        min_matches: 30,
        table_count: 20,
    };
    let msg = err.to_string();
    assert!(msg.contains("30"));
    assert!(msg.contains("20"));
}

// --- From impls into the aggregate error ---

#[test]
fn context_error_converts_to_ss_error() {
    let err: SsError = ContextError::SecretKeyRejected.into();
    assert!(matches!(err, SsError::Context(_)));
}

#[test]
fn lsh_error_converts_to_ss_error() {
    let err: SsError = LshError::InvalidConfig {
        reason: "T must be positive".into(),
    }
    .into();
    assert!(matches!(err, SsError::Lsh(_)));
}

#[test]
fn store_error_converts_to_ss_error() {
    let err: SsError = StoreError::EmptyCiphertext.into();
    assert!(matches!(err, SsError::Store(_)));
}

#[test]
fn validation_error_converts_to_ss_error() {
    let err: SsError = ValidationError::ZeroTopK.into();
    assert!(matches!(err, SsError::Validation(_)));
}

#[test]
fn tenant_error_converts_to_ss_error() {
    let err: SsError = TenantError::NotInitialized {
        tenant_id: "tenant-c".into(),
    }
    .into();
    assert!(matches!(err, SsError::Tenant(_)));
}

#[test]
fn serialization_error_converts_to_ss_error() {
    let json_err = serde_json::from_str::<String>("not valid json").unwrap_err();
    let err: SsError = json_err.into();
    assert!(matches!(err, SsError::Serialization(_)));
}
