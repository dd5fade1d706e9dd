//! SQLite-based unified store using `SeaORM`.
//!
//! A single `SqliteStore` implements `DomainRepository`, `RecordStore` and
//! `AssignmentRepository`, backed by a local `SQLite` database. Uniqueness of root domains,
//! of record names within a domain and of assignments is enforced by the schema.

mod assignment_repo;
mod domain_repo;
pub(crate) mod entity;
mod migration;
mod record_store;

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use sea_orm::{Database, DatabaseConnection, DbErr, SqlErr};
use sea_orm_migration::MigratorTrait;

use subzone_core::error::{CoreError, CoreResult};

use migration::Migrator;

/// SQLite-based store for the CLI and other single-process frontends.
pub struct SqliteStore {
    /// Shared `SeaORM` database connection.
    pub(crate) db: DatabaseConnection,
}

impl SqliteStore {
    /// Open (or create) the database at `db_path` and bring the schema up to date.
    ///
    /// # Errors
    /// Returns `CoreError::StorageError` if directory creation, database
    /// connection, or schema migration fails.
    pub async fn new(db_path: &Path) -> CoreResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::StorageError(format!("Failed to create directory: {e}")))?;
        }

        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        let db = Database::connect(&db_url)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to connect to SQLite: {e}")))?;

        Migrator::up(&db, None)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to run migrations: {e}")))?;

        log::debug!("SQLite store ready at {}", db_path.display());
        Ok(Self { db })
    }
}

/// Wrap a database error as `StorageError` with what was being attempted.
pub(crate) fn storage_error(action: &'static str) -> impl FnOnce(DbErr) -> CoreError {
    move |e| CoreError::StorageError(format!("Failed to {action}: {e}"))
}

pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Fixed-width RFC 3339 so that text ordering matches time ordering.
pub(crate) fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(field: &str, value: &str) -> CoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| CoreError::StorageError(format!("Invalid {field}: {e}")))
}
