// crates/server/src/routes/mod.rs
//! API route handlers for the timesheet server.

pub mod categories;
pub mod entries;
pub mod health;
pub mod pages;
pub mod tasks;

use std::sync::Arc;

use axum::Router;

use crate::error::ApiError;
use crate::state::AppState;

/// Create the API router with all routes.
///
/// Routes:
/// - GET    /api/health            - Health check
/// - GET    /api/entries           - List time entries
/// - POST   /api/entries           - Create a time entry
/// - PUT    /api/entries/{id}      - Replace a time entry
/// - DELETE /api/entries/{id}      - Delete a time entry
/// - GET    /api/categories        - List categories
/// - POST   /api/categories        - Create a category
/// - PUT    /api/categories/{id}   - Replace a category
/// - DELETE /api/categories/{id}   - Delete a category
/// - GET    /api/tasks             - List tasks
/// - POST   /api/tasks             - Create a task
/// - PUT    /api/tasks/{id}        - Replace a task
/// - DELETE /api/tasks/{id}        - Delete a task
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", health::router())
        .nest("/api", entries::router())
        .nest("/api", categories::router())
        .nest("/api", tasks::router())
        .with_state(state)
}

/// Handler for `/api/<kind>/` with the id left off.
pub(crate) async fn missing_id() -> ApiError {
    ApiError::BadRequest("missing id in path".to_string())
}
