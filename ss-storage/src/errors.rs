use ss_core::errors::SsError;

/// Converts a SQLite/rusqlite failure into the aggregate error type.
/// `ss-storage` has no error enum of its own the way the other components
/// do — the durable mirror is a narrow, single-purpose crate, so its
/// failures collapse directly into `SsError::Storage`.
pub fn to_storage_err(message: impl Into<String>) -> SsError {
    SsError::Storage(message.into())
}
