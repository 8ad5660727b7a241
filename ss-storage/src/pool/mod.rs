//! Connection pool managing the single write connection and the read pool.

mod pragmas;
mod read_pool;
mod write_connection;

use std::path::{Path, PathBuf};

use ss_core::errors::SsResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

pub struct ConnectionPool {
    pub writer: WriteConnection,
    pub readers: ReadPool,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    pub fn open(path: &Path, wal_mode: bool, busy_timeout_ms: u32, read_pool_size: usize) -> SsResult<Self> {
        let writer = WriteConnection::open(path, wal_mode, busy_timeout_ms)?;
        let readers = ReadPool::open(path, read_pool_size)?;
        Ok(Self {
            writer,
            readers,
            db_path: Some(path.to_path_buf()),
        })
    }

    pub fn open_in_memory(read_pool_size: usize) -> SsResult<Self> {
        let writer = WriteConnection::open_in_memory()?;
        let readers = ReadPool::open_in_memory(read_pool_size)?;
        Ok(Self {
            writer,
            readers,
            db_path: None,
        })
    }
}
