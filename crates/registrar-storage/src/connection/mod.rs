//! Connection management: write-serialized + read-pooled.

pub mod pool;
pub mod pragmas;
pub mod writer;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use registrar_core::errors::{RegistrarResult, StorageError};
use rusqlite::Connection;

use self::pool::ReadPool;
use self::pragmas::apply_pragmas;
use crate::migrations;

/// Manages the single write connection and the read connection pool.
pub struct DatabaseManager {
    writer: Mutex<Connection>,
    /// `None` for in-memory databases.
    readers: Option<ReadPool>,
    path: Option<PathBuf>,
}

impl DatabaseManager {
    /// Open a database at the given path, apply pragmas, run migrations.
    pub fn open(path: &Path, read_pool_size: usize) -> RegistrarResult<Self> {
        let writer = Connection::open(path)
            .map_err(|e| StorageError::sqlite(format!("open {}: {e}", path.display())))?;
        apply_pragmas(&writer)?;
        migrations::run_migrations(&writer)?;

        let readers = ReadPool::open(path, read_pool_size)?;

        Ok(Self {
            writer: Mutex::new(writer),
            readers: Some(readers),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for testing).
    /// In-memory read connections would be separate databases, so every
    /// read is routed through the writer instead.
    pub fn open_in_memory() -> RegistrarResult<Self> {
        let writer = Connection::open_in_memory()
            .map_err(|e| StorageError::sqlite(format!("open in-memory: {e}")))?;
        apply_pragmas(&writer)?;
        migrations::run_migrations(&writer)?;

        Ok(Self {
            writer: Mutex::new(writer),
            readers: None,
            path: None,
        })
    }

    /// Execute a write operation with the serialized writer connection.
    pub fn with_writer<F, T>(&self, f: F) -> RegistrarResult<T>
    where
        F: FnOnce(&Connection) -> RegistrarResult<T>,
    {
        let guard = self
            .writer
            .lock()
            .map_err(|_| StorageError::sqlite("write lock poisoned"))?;
        f(&guard)
    }

    /// Execute a read operation. File-backed databases use the read pool;
    /// in-memory databases use the writer.
    pub fn with_reader<F, T>(&self, f: F) -> RegistrarResult<T>
    where
        F: FnOnce(&Connection) -> RegistrarResult<T>,
    {
        match &self.readers {
            Some(pool) => pool.with_conn(f),
            None => self.with_writer(f),
        }
    }

    /// Run a WAL checkpoint (TRUNCATE mode).
    pub fn checkpoint(&self) -> RegistrarResult<()> {
        self.with_writer(|conn| {
            conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")
                .map_err(|e| StorageError::sqlite(e.to_string()).into())
        })
    }

    /// Get the database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of pooled read connections; zero for in-memory databases.
    pub fn reader_count(&self) -> usize {
        self.readers.as_ref().map_or(0, ReadPool::size)
    }
}
