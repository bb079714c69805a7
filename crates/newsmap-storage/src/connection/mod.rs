//! Connection management: write-serialized + read-pooled.

pub mod pool;
pub mod pragmas;
pub mod writer;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use newsmap_core::config::StorageConfig;
use newsmap_core::errors::StorageError;
use rusqlite::Connection;

use self::pool::ReadPool;
use self::pragmas::{apply_pragmas, set_busy_timeout};
use crate::{migrations, to_storage_err};

/// Owns the single write connection and the read connection pool.
///
/// File-backed databases serve reads from the pool. In-memory databases route
/// reads through the writer, since separate in-memory connections are
/// separate databases.
pub struct DatabaseManager {
    writer: Mutex<Connection>,
    readers: Option<ReadPool>,
    path: Option<PathBuf>,
}

impl DatabaseManager {
    /// Open a database at the given path with default settings.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Self::open_with_config(path, &StorageConfig::default())
    }

    /// Open a database at the given path, apply pragmas, run migrations,
    /// then open the read pool.
    pub fn open_with_config(path: &Path, config: &StorageConfig) -> Result<Self, StorageError> {
        let busy_timeout = config.effective_busy_timeout();
        let writer = Connection::open(path).map_err(|e| to_storage_err("open writer", e))?;
        apply_pragmas(&writer)?;
        set_busy_timeout(&writer, busy_timeout)?;
        migrations::run_migrations(&writer)?;

        let readers = ReadPool::open(path, config.effective_read_pool_size(), busy_timeout)?;
        tracing::info!(path = %path.display(), readers = readers.size(), "opened mapping database");

        Ok(Self {
            writer: Mutex::new(writer),
            readers: Some(readers),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let writer =
            Connection::open_in_memory().map_err(|e| to_storage_err("open in-memory writer", e))?;
        apply_pragmas(&writer)?;
        set_busy_timeout(&writer, StorageConfig::default().effective_busy_timeout())?;
        migrations::run_migrations(&writer)?;

        Ok(Self {
            writer: Mutex::new(writer),
            readers: None,
            path: None,
        })
    }

    /// Execute a write operation with the serialized writer connection.
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let guard = self
            .writer
            .lock()
            .map_err(|_| StorageError::unavailable("write lock poisoned"))?;
        f(&guard)
    }

    /// Execute a read operation on the best available connection.
    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        match &self.readers {
            Some(readers) => readers.with_conn(f),
            None => self.with_writer(f),
        }
    }

    /// Get the database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
