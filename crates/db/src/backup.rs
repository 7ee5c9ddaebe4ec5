// crates/db/src/backup.rs
//! Pre-migration snapshot of the store file.

use chrono::{DateTime, Local};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::{DbError, DbResult};

/// Sibling path for a backup of `path` taken at schema `version`:
/// `<stem>_backup_v<version>_<YYYYMMDD_HHMMSS>.db`.
pub fn backup_path(path: &Path, version: i64, at: DateTime<Local>) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "timesheet".to_string());
    path.with_file_name(format!(
        "{stem}_backup_v{version}_{}.db",
        at.format("%Y%m%d_%H%M%S")
    ))
}

/// Copy the store aside when its recorded schema version differs from
/// `target_version`.
///
/// Returns the backup path, or `None` when there was nothing to back up
/// (no file yet, or already at the target version). Must run before any
/// pooled connection opens the file.
pub async fn backup_if_outdated(path: &Path, target_version: i64) -> DbResult<Option<PathBuf>> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        info!(path = %path.display(), "No existing database, skipping backup");
        return Ok(None);
    }

    let current = recorded_version(path).await?;
    if current == target_version {
        info!(version = current, "Database schema is current, no backup needed");
        return Ok(None);
    }

    let backup = backup_path(path, current, Local::now());
    copy_durably(path, &backup)
        .await
        .map_err(|source| DbError::Backup {
            path: path.to_owned(),
            backup: backup.clone(),
            source,
        })?;

    info!(
        from = current,
        to = target_version,
        backup = %backup.display(),
        "Database backup created before migration"
    );
    Ok(Some(backup))
}

/// Schema version recorded in the file, or 0 when it has no `db_version` table.
async fn recorded_version(path: &Path) -> DbResult<i64> {
    let mut conn: SqliteConnection = SqliteConnectOptions::new()
        .filename(path)
        .read_only(true)
        .connect()
        .await?;

    let version = match sqlx::query_as::<_, (i64,)>(
        "SELECT COALESCE(MAX(version), 0) FROM db_version",
    )
    .fetch_one(&mut conn)
    .await
    {
        Ok((v,)) => v,
        Err(e) => {
            warn!(error = %e, "No readable version table, assuming version 0");
            0
        }
    };

    conn.close().await?;
    Ok(version)
}

async fn copy_durably(from: &Path, to: &Path) -> std::io::Result<()> {
    tokio::fs::copy(from, to).await?;
    let file = tokio::fs::OpenOptions::new().write(true).open(to).await?;
    file.sync_all().await
}
