// crates/db/src/queries/tasks.rs
//! Task CRUD queries.

use timesheet_core::{validate_task, DbId, Task, TaskRequest, ValidatedTask};
use tracing::info;

use super::row_types::{TaskRow, TASK_COLUMNS};
use crate::{Database, DbError, DbResult};

impl Database {
    /// All tasks, ordered by name.
    pub async fn list_tasks(&self) -> DbResult<Vec<Task>> {
        let rows: Vec<TaskRow> = sqlx::query_as(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY name, id"
        ))
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(TaskRow::into_task).collect())
    }

    pub async fn get_task(&self, id: DbId) -> DbResult<Option<Task>> {
        let row: Option<TaskRow> =
            sqlx::query_as(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?"))
                .bind(id)
                .fetch_optional(self.pool())
                .await?;
        Ok(row.map(TaskRow::into_task))
    }

    async fn validate_task_request(&self, req: &TaskRequest) -> DbResult<ValidatedTask> {
        let task = validate_task(req)?;
        if let Some(category_id) = task.category_id {
            self.ensure_category_id_exists(category_id).await?;
        }
        Ok(task)
    }

    pub async fn create_task(&self, req: &TaskRequest) -> DbResult<Task> {
        let task = self.validate_task_request(req).await?;

        let row: TaskRow = sqlx::query_as(&format!(
            "INSERT INTO tasks (name, category_id, description) VALUES (?, ?, ?) RETURNING {TASK_COLUMNS}"
        ))
        .bind(&task.name)
        .bind(task.category_id)
        .bind(&task.description)
        .fetch_one(self.pool())
        .await?;

        let created = row.into_task();
        info!(id = created.id, name = %created.name, "Task created");
        Ok(created)
    }

    pub async fn update_task(&self, id: DbId, req: &TaskRequest) -> DbResult<Task> {
        let task = self.validate_task_request(req).await?;

        let row: Option<TaskRow> = sqlx::query_as(&format!(
            "UPDATE tasks SET name = ?, category_id = ?, description = ? WHERE id = ? RETURNING {TASK_COLUMNS}"
        ))
        .bind(&task.name)
        .bind(task.category_id)
        .bind(&task.description)
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        let updated = row
            .ok_or(DbError::NotFound { entity: "task", id })?
            .into_task();
        info!(id, name = %updated.name, "Task updated");
        Ok(updated)
    }

    pub async fn delete_task(&self, id: DbId) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound { entity: "task", id });
        }
        info!(id, "Task deleted");
        Ok(())
    }
}
