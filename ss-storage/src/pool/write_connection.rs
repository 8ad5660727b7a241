use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use ss_core::errors::SsResult;

use super::pragmas::apply_write_pragmas;
use crate::errors::to_storage_err;
use crate::migrations;

/// The single writer connection for the mirror. SQLite only allows one
/// writer at a time; serializing writes through a `Mutex` here means
/// every mutation goes through one connection instead of contending on
/// SQLite's own file lock.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &Path, wal_mode: bool, busy_timeout_ms: u32) -> SsResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_write_pragmas(&conn, wal_mode, busy_timeout_ms)?;
        migrations::run_all(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> SsResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        conn.pragma_update(None, "foreign_keys", true)
            .map_err(|e| to_storage_err(e.to_string()))?;
        migrations::run_all(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> SsResult<T>
    where
        F: FnOnce(&Connection) -> SsResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| to_storage_err(format!("write connection lock poisoned: {e}")))?;
        f(&guard)
    }
}
