// crates/db/src/queries/entries.rs
//! Time entry CRUD queries.

use chrono::Local;
use timesheet_core::{format_timestamp, validate_time_entry, DbId, TimeEntry, TimeEntryRequest};
use tracing::info;

use super::row_types::{TimeEntryRow, ENTRY_COLUMNS};
use crate::{Database, DbError, DbResult};

/// Local calendar date stamped on an entry when it is written.
fn current_date() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

impl Database {
    /// All time entries, most recent start first.
    ///
    /// Ordering compares instants, so entries submitted with different UTC
    /// offsets still sort correctly. Ties (and legacy rows without a start
    /// time, which sort last) fall back to newest id first.
    pub async fn list_time_entries(&self) -> DbResult<Vec<TimeEntry>> {
        let rows: Vec<TimeEntryRow> = sqlx::query_as(&format!(
            "SELECT {ENTRY_COLUMNS} FROM time_entries ORDER BY julianday(start_time) DESC, id DESC"
        ))
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(TimeEntryRow::into_time_entry).collect())
    }

    pub async fn get_time_entry(&self, id: DbId) -> DbResult<Option<TimeEntry>> {
        let row: Option<TimeEntryRow> = sqlx::query_as(&format!(
            "SELECT {ENTRY_COLUMNS} FROM time_entries WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row.map(TimeEntryRow::into_time_entry))
    }

    /// Validate, check the category reference, and insert.
    pub async fn create_time_entry(&self, req: &TimeEntryRequest) -> DbResult<TimeEntry> {
        let entry = validate_time_entry(req)?;
        self.ensure_category_exists(&entry.category).await?;

        let row: TimeEntryRow = sqlx::query_as(&format!(
            r#"INSERT INTO time_entries
                (task, description, category, start_time, end_time, duration, date)
               VALUES (?, ?, ?, ?, ?, ?, ?)
               RETURNING {ENTRY_COLUMNS}"#
        ))
        .bind(&entry.task)
        .bind(&entry.description)
        .bind(&entry.category)
        .bind(format_timestamp(&entry.start_time))
        .bind(format_timestamp(&entry.end_time))
        .bind(entry.duration_minutes)
        .bind(current_date())
        .fetch_one(self.pool())
        .await?;

        let created = row.into_time_entry();
        info!(
            id = created.id,
            task = %created.task,
            minutes = created.duration,
            "Time entry created"
        );
        Ok(created)
    }

    /// Replace every mutable field of an existing entry.
    ///
    /// Validation and the category check run before the id is looked up, so
    /// a bad payload is reported even when the id does not exist.
    pub async fn update_time_entry(
        &self,
        id: DbId,
        req: &TimeEntryRequest,
    ) -> DbResult<TimeEntry> {
        let entry = validate_time_entry(req)?;
        self.ensure_category_exists(&entry.category).await?;

        let row: Option<TimeEntryRow> = sqlx::query_as(&format!(
            r#"UPDATE time_entries
               SET task = ?, description = ?, category = ?, start_time = ?, end_time = ?,
                   duration = ?, date = ?
               WHERE id = ?
               RETURNING {ENTRY_COLUMNS}"#
        ))
        .bind(&entry.task)
        .bind(&entry.description)
        .bind(&entry.category)
        .bind(format_timestamp(&entry.start_time))
        .bind(format_timestamp(&entry.end_time))
        .bind(entry.duration_minutes)
        .bind(current_date())
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        let updated = row
            .ok_or(DbError::NotFound {
                entity: "time entry",
                id,
            })?
            .into_time_entry();
        info!(id, minutes = updated.duration, "Time entry updated");
        Ok(updated)
    }

    pub async fn delete_time_entry(&self, id: DbId) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM time_entries WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                entity: "time entry",
                id,
            });
        }
        info!(id, "Time entry deleted");
        Ok(())
    }
}
