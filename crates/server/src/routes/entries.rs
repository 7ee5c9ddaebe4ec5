// crates/server/src/routes/entries.rs
//! Time entry endpoints.

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
use timesheet_core::{DbId, TimeEntry, TimeEntryRequest};

use super::missing_id;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/entries - List all time entries, most recent start first.
pub async fn list_entries(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<TimeEntry>>> {
    let entries = state.db.list_time_entries().await?;
    Ok(Json(entries))
}

/// POST /api/entries - Create a time entry.
///
/// The server derives `duration` (whole minutes) and `date`; any such keys
/// in the body are ignored.
pub async fn create_entry(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TimeEntryRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TimeEntry>)> {
    let Json(req) = payload?;
    let entry = state.db.create_time_entry(&req).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /api/entries/{id} - Replace a time entry.
pub async fn update_entry(
    State(state): State<Arc<AppState>>,
    id: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<TimeEntryRequest>, JsonRejection>,
) -> ApiResult<Json<TimeEntry>> {
    let Path(id) = id?;
    let Json(req) = payload?;
    let entry = state.db.update_time_entry(id, &req).await?;
    Ok(Json(entry))
}

/// DELETE /api/entries/{id} - Delete a time entry.
pub async fn delete_entry(
    State(state): State<Arc<AppState>>,
    id: Result<Path<DbId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    state.db.delete_time_entry(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/entries", get(list_entries).post(create_entry))
        .route("/entries/", any(missing_id))
        .route("/entries/{id}", put(update_entry).delete(delete_entry))
}
