mod v001_tenants;
mod v002_embeddings;
mod v003_lsh_entries;

use rusqlite::Connection;
use ss_core::errors::SsResult;

/// Run every migration in order. Each migration is idempotent
/// (`CREATE TABLE IF NOT EXISTS`), so this is safe to call on every
/// process start. There's no separate `schema_version` bookkeeping table —
/// only three tables, and they never evolve independently.
pub fn run_all(conn: &Connection) -> SsResult<()> {
    v001_tenants::migrate(conn)?;
    v002_embeddings::migrate(conn)?;
    v003_lsh_entries::migrate(conn)?;
    Ok(())
}
