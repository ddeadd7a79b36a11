//! Schema migrations using PRAGMA user_version.

pub mod v001_catalog;
pub mod v002_students;
pub mod v003_enrollments;
pub mod v004_certificates;

use registrar_core::errors::StorageError;
use rusqlite::Connection;

/// Run all pending migrations.
pub fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    let current_version = current_version(conn)?;

    let migrations: &[(&str, u32)] = &[
        (v001_catalog::MIGRATION_SQL, 1),
        (v002_students::MIGRATION_SQL, 2),
        (v003_enrollments::MIGRATION_SQL, 3),
        (v004_certificates::MIGRATION_SQL, 4),
    ];

    for (sql, version) in migrations {
        if current_version < *version {
            conn.execute_batch(sql)
                .map_err(|e| StorageError::MigrationFailed {
                    version: *version,
                    message: e.to_string(),
                })?;

            conn.pragma_update(None, "user_version", version)
                .map_err(|e| StorageError::MigrationFailed {
                    version: *version,
                    message: e.to_string(),
                })?;
            tracing::info!(version = version, "applied migration");
        }
    }

    Ok(())
}

/// Get the current schema version.
pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })
}

/// Latest schema version this build knows about.
pub const LATEST_VERSION: u32 = 4;
