//! Read-only connections handed out round-robin.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use registrar_core::constants::MAX_READ_POOL_SIZE;
use registrar_core::errors::{RegistrarResult, StorageError};
use rusqlite::{Connection, OpenFlags};

use super::pragmas::apply_read_pragmas;

pub struct ReadPool {
    connections: Vec<Mutex<Connection>>,
    cursor: AtomicUsize,
}

impl ReadPool {
    /// Opens between 1 and `MAX_READ_POOL_SIZE` connections to `path`.
    pub fn open(path: &Path, pool_size: usize) -> RegistrarResult<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let connections = (0..pool_size.clamp(1, MAX_READ_POOL_SIZE))
            .map(|_| {
                let conn = Connection::open_with_flags(path, flags).map_err(|e| {
                    StorageError::sqlite(format!("open reader {}: {e}", path.display()))
                })?;
                apply_read_pragmas(&conn)?;
                Ok(Mutex::new(conn))
            })
            .collect::<RegistrarResult<Vec<_>>>()?;
        Ok(Self {
            connections,
            cursor: AtomicUsize::new(0),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> RegistrarResult<T>
    where
        F: FnOnce(&Connection) -> RegistrarResult<T>,
    {
        let slot = self.cursor.fetch_add(1, Ordering::Relaxed) % self.connections.len();
        let conn = self.connections[slot]
            .lock()
            .map_err(|_| StorageError::sqlite(format!("reader {slot} lock poisoned")))?;
        f(&conn)
    }

    pub fn size(&self) -> usize {
        self.connections.len()
    }
}
