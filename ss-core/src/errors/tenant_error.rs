/// Tenant registry / lifecycle errors.
#[derive(Debug, thiserror::Error)]
pub enum TenantError {
    #[error("tenant {tenant_id} already initialized")]
    AlreadyInitialized { tenant_id: String },

    #[error("tenant {tenant_id} not initialized")]
    NotInitialized { tenant_id: String },

    #[error("tenant {tenant_id} is being torn down")]
    TearingDown { tenant_id: String },
}
