// crates/server/src/routes/categories.rs
//! Category endpoints.

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
use timesheet_core::{Category, CategoryRequest, DbId};

use super::missing_id;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/categories - List categories by name.
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(state.db.list_categories().await?))
}

/// POST /api/categories - Create a category. `color` defaults to grey.
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let Json(req) = payload?;
    let category = state.db.create_category(&req).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/categories/{id} - Rename or recolor a category.
pub async fn update_category(
    State(state): State<Arc<AppState>>,
    id: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> ApiResult<Json<Category>> {
    let Path(id) = id?;
    let Json(req) = payload?;
    Ok(Json(state.db.update_category(id, &req).await?))
}

/// DELETE /api/categories/{id} - Delete a category.
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    id: Result<Path<DbId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    state.db.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/", any(missing_id))
        .route(
            "/categories/{id}",
            put(update_category).delete(delete_category),
        )
}
