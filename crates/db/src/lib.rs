// crates/db/src/lib.rs
// SQLite persistence for time entries, categories and tasks.

pub mod backup;
pub mod migrations;
mod queries;

pub use backup::{backup_if_outdated, backup_path};
pub use migrations::TARGET_SCHEMA_VERSION;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use timesheet_core::{DbId, ValidationError};
use tracing::{debug, info};

use crate::migrations::{is_duplicate_column, Step, MIGRATIONS, VERSION_TABLE_SQL};

#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Failed to create database directory: {0}")]
    CreateDir(#[from] std::io::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid category '{0}': category does not exist")]
    UnknownCategory(String),

    #[error("invalid category_id {0}: category does not exist")]
    UnknownCategoryId(DbId),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("category '{0}' already exists")]
    DuplicateCategory(String),

    #[error("Failed to back up {} to {}: {source}", .path.display(), .backup.display())]
    Backup {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Migration {version} failed: {source}")]
    Migration {
        version: i64,
        #[source]
        source: sqlx::Error,
    },
}

pub type DbResult<T> = Result<T, DbError>;

/// Main database handle wrapping a SQLite connection pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    db_path: PathBuf,
}

impl Database {
    /// Open (or create) the store at `path`.
    ///
    /// An existing file whose schema version differs from
    /// [`TARGET_SCHEMA_VERSION`] is copied aside before any connection is
    /// opened; a failed backup aborts startup and leaves the file untouched.
    pub async fn new(path: &Path) -> DbResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        backup_if_outdated(path, TARGET_SCHEMA_VERSION).await?;

        // Rollback journal keeps every committed page in the main file, so a
        // plain file copy is a complete backup.
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Delete)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(30));

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;

        let db = Self {
            pool,
            db_path: path.to_owned(),
        };
        db.run_migrations().await?;

        info!("Database opened at {}", path.display());
        Ok(db)
    }

    /// Create an in-memory database (for testing).
    ///
    /// Uses `shared_cache(true)` so all pool connections share the same
    /// in-memory database.
    pub async fn new_in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?
            .shared_cache(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;
        let db = Self {
            pool,
            db_path: PathBuf::new(),
        };
        db.run_migrations().await?;
        Ok(db)
    }

    /// Bring the schema up to [`TARGET_SCHEMA_VERSION`].
    ///
    /// Versions already recorded in `db_version` are skipped. Each step is
    /// idempotent on its own, so re-running a migration against a store that
    /// already has its tables is harmless.
    pub async fn run_migrations(&self) -> DbResult<()> {
        sqlx::query(VERSION_TABLE_SQL).execute(&self.pool).await?;

        let current = self.schema_version().await?;
        if current >= TARGET_SCHEMA_VERSION {
            debug!(version = current, "Schema is up to date");
            return Ok(());
        }

        for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
            info!(
                version = migration.version,
                description = migration.description,
                "Applying migration"
            );
            for step in migration.steps {
                self.apply_step(migration.version, step).await?;
            }
            sqlx::query("INSERT INTO db_version (version) VALUES (?)")
                .bind(migration.version)
                .execute(&self.pool)
                .await?;
        }

        info!(
            from = current,
            to = TARGET_SCHEMA_VERSION,
            "Database migrations completed"
        );
        Ok(())
    }

    async fn apply_step(&self, version: i64, step: &Step) -> DbResult<()> {
        let sql = step.sql();
        match sqlx::query(&sql).execute(&self.pool).await {
            Ok(_) => Ok(()),
            Err(e) if matches!(step, Step::AddColumn { .. }) && is_duplicate_column(&e) => {
                // Column already exists from a store created by a newer schema.
                debug!(version, sql = %sql, "Column already present, skipping");
                Ok(())
            }
            Err(source) => Err(DbError::Migration { version, source }),
        }
    }

    /// Highest migration version recorded in the store (0 if none).
    pub async fn schema_version(&self) -> DbResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COALESCE(MAX(version), 0) FROM db_version")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get the path to the database file.
    /// Returns an empty path for in-memory databases.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}
