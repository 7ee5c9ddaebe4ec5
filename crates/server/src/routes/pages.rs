// crates/server/src/routes/pages.rs
//! HTML pages and static assets for the browser UI.

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};

use crate::assets;

/// GET / - Time tracking page.
async fn index_page() -> Html<&'static str> {
    Html(assets::INDEX_HTML)
}

/// GET /entries - Entry list page.
async fn entries_page() -> Html<&'static str> {
    Html(assets::ENTRIES_HTML)
}

/// GET /config - Category and task management page.
async fn config_page() -> Html<&'static str> {
    Html(assets::CONFIG_HTML)
}

/// GET /static/{file} - Embedded CSS and JS.
async fn static_file(Path(file): Path<String>) -> Response {
    match assets::static_file(&file) {
        Some((content_type, body)) => ([(header::CONTENT_TYPE, content_type)], body).into_response(),
        None => (StatusCode::NOT_FOUND, "File not found").into_response(),
    }
}

/// GET /favicon.ico
async fn favicon() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/x-icon")], assets::FAVICON)
}

/// Routes for the UI. Stateless, merged next to the API in `create_app`.
pub fn router() -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/entries", get(entries_page))
        .route("/config", get(config_page))
        .route("/static/{file}", get(static_file))
        .route("/favicon.ico", get(favicon))
}
