//! End-to-end tests against a file-backed store: data written through the API
//! survives a restart, and a restart does not take a second backup.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::path::Path;
use timesheet_db::Database;
use timesheet_server::create_app;
use tower::ServiceExt;

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn open_app(path: &Path) -> (Router, Database) {
    let db = Database::new(path).await.unwrap();
    (create_app(db.clone()), db)
}

#[tokio::test]
async fn test_entries_survive_restart() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("timesheet.db");

    let (app, db) = open_app(&path).await;
    let (status, created) = call(
        &app,
        Method::POST,
        "/api/entries",
        Some(json!({
            "task": "Write report",
            "category": "project support",
            "start_time": "2025-11-09T13:00:00+01:00",
            "end_time": "2025-11-09T14:15:00+01:00",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["duration"], 75);
    drop(app);
    db.pool().close().await;

    let (app, _db) = open_app(&path).await;
    let (status, list) = call(&app, Method::GET, "/api/entries", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], created["id"]);
    assert_eq!(list[0]["start_time"], "2025-11-09T13:00:00+01:00");
    assert_eq!(list[0]["category"], "project support");

    let backups = std::fs::read_dir(tmp.path())
        .unwrap()
        .filter(|e| {
            e.as_ref()
                .unwrap()
                .file_name()
                .to_string_lossy()
                .contains("_backup_v")
        })
        .count();
    assert_eq!(backups, 0, "a store created by this build is never backed up");
}

#[tokio::test]
async fn test_category_rename_leaves_entries_untouched() {
    let tmp = tempfile::tempdir().unwrap();
    let (app, _db) = open_app(&tmp.path().join("timesheet.db")).await;

    let (_, category) = call(
        &app,
        Method::POST,
        "/api/categories",
        Some(json!({"name": "research", "color": "#805ad5"})),
    )
    .await;
    call(
        &app,
        Method::POST,
        "/api/entries",
        Some(json!({
            "task": "Read papers",
            "category": "research",
            "start_time": "2025-11-09T09:00:00Z",
            "end_time": "2025-11-09T10:00:00Z",
        })),
    )
    .await;

    let (status, _) = call(
        &app,
        Method::PUT,
        &format!("/api/categories/{}", category["id"]),
        Some(json!({"name": "reading"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = call(&app, Method::GET, "/api/entries", None).await;
    assert_eq!(list[0]["category"], "research");
}
