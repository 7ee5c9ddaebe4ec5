// crates/server/src/routes/tasks.rs
//! Task endpoints.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{any, get, put},
    Json, Router,
};
use timesheet_core::{DbId, Task, TaskRequest};

use super::missing_id;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/tasks - List tasks by name.
pub async fn list_tasks(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Task>>> {
    Ok(Json(state.db.list_tasks().await?))
}

/// POST /api/tasks - Create a task, optionally linked to a category id.
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TaskRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let Json(req) = payload?;
    let task = state.db.create_task(&req).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /api/tasks/{id} - Replace a task.
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    id: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<TaskRequest>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    let Path(id) = id?;
    let Json(req) = payload?;
    Ok(Json(state.db.update_task(id, &req).await?))
}

/// DELETE /api/tasks/{id} - Delete a task.
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    id: Result<Path<DbId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    state.db.delete_task(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/", any(missing_id))
        .route("/tasks/{id}", put(update_task).delete(delete_task))
}
