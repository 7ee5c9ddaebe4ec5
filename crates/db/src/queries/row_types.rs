// crates/db/src/queries/row_types.rs
// Internal row types mapping SQLite rows onto the wire types.

use chrono::DateTime;
use sqlx::Row;
use timesheet_core::{Category, DbId, Task, TimeEntry, Timestamp};
use tracing::warn;

pub(crate) const ENTRY_COLUMNS: &str =
    "id, task, description, category, start_time, end_time, duration, date";
pub(crate) const CATEGORY_COLUMNS: &str = "id, name, color";
pub(crate) const TASK_COLUMNS: &str = "id, name, category_id, description";

#[derive(Debug)]
pub(crate) struct TimeEntryRow {
    id: DbId,
    task: String,
    description: Option<String>,
    category: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
    duration: i64,
    date: String,
}

impl<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> for TimeEntryRow {
    fn from_row(row: &'r sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            task: row.try_get("task")?,
            description: row.try_get("description")?,
            category: row.try_get("category")?,
            start_time: row.try_get("start_time")?,
            end_time: row.try_get("end_time")?,
            duration: row.try_get("duration")?,
            date: row.try_get("date")?,
        })
    }
}

impl TimeEntryRow {
    pub(crate) fn into_time_entry(self) -> TimeEntry {
        TimeEntry {
            start_time: stored_timestamp(self.id, "start_time", self.start_time),
            end_time: stored_timestamp(self.id, "end_time", self.end_time),
            id: self.id,
            task: self.task,
            description: self.description.unwrap_or_default(),
            category: self.category.unwrap_or_else(|| "other".to_string()),
            duration: self.duration,
            date: self.date,
        }
    }
}

/// Legacy rows may hold NULL or unparseable timestamps; those read as absent.
fn stored_timestamp(id: DbId, column: &str, raw: Option<String>) -> Option<Timestamp> {
    let raw = raw.filter(|s| !s.is_empty())?;
    match DateTime::parse_from_rfc3339(&raw) {
        Ok(ts) => Some(ts),
        Err(e) => {
            warn!(id, column, value = %raw, error = %e, "Unreadable stored timestamp");
            None
        }
    }
}

#[derive(Debug)]
pub(crate) struct CategoryRow {
    id: DbId,
    name: String,
    color: String,
}

impl<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> for CategoryRow {
    fn from_row(row: &'r sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            color: row.try_get("color")?,
        })
    }
}

impl CategoryRow {
    pub(crate) fn into_category(self) -> Category {
        Category {
            id: self.id,
            name: self.name,
            color: self.color,
        }
    }
}

#[derive(Debug)]
pub(crate) struct TaskRow {
    id: DbId,
    name: String,
    category_id: Option<DbId>,
    description: Option<String>,
}

impl<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> for TaskRow {
    fn from_row(row: &'r sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            category_id: row.try_get("category_id")?,
            description: row.try_get("description")?,
        })
    }
}

impl TaskRow {
    pub(crate) fn into_task(self) -> Task {
        Task {
            id: self.id,
            name: self.name,
            category_id: self.category_id,
            description: self.description.unwrap_or_default(),
        }
    }
}
