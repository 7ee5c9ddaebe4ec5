// crates/server/src/lib.rs
//! Timesheet server library.
//!
//! This crate provides the Axum-based HTTP server for the timesheet
//! application: a JSON API over time entries, categories and tasks, and a
//! small embedded browser UI.

mod assets;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::*;
pub use routes::api_routes;
pub use state::AppState;

use axum::Router;
use timesheet_db::Database;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the Axum application with all routes and middleware.
///
/// This sets up:
/// - API routes under `/api`
/// - UI pages, `/static/*` and the favicon
/// - CORS (allows any origin)
/// - Request tracing
pub fn create_app(db: Database) -> Router {
    let state = AppState::new(db);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api_routes(state))
        .merge(routes::pages::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// Integration Tests
// ============================================================================
