use rusqlite::Connection;
use ss_core::errors::SsResult;

use crate::errors::to_storage_err;

pub fn apply_write_pragmas(conn: &Connection, wal_mode: bool, busy_timeout_ms: u32) -> SsResult<()> {
    if wal_mode {
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| to_storage_err(e.to_string()))?;
    }
    conn.pragma_update(None, "busy_timeout", busy_timeout_ms)
        .map_err(|e| to_storage_err(e.to_string()))?;
    conn.pragma_update(None, "foreign_keys", true)
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn apply_read_pragmas(conn: &Connection) -> SsResult<()> {
    conn.pragma_update(None, "query_only", true)
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
