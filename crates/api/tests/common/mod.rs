//! Shared helpers for API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use notebook_api::config::{LogFormat, ServerConfig, StoreBackend};
use notebook_api::router::build_app_router;
use notebook_api::state::AppState;
use notebook_db::store::{MemoryStore, NoteStore, SqliteStore};
use serde_json::Value;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        database_url: "sqlite::memory:".to_string(),
        seed_data: false,
        log_format: LogFormat::Pretty,
    }
}

/// Build the full application router over the given store, with the same
/// middleware stack production uses.
pub fn build_test_app(store: Arc<dyn NoteStore>) -> Router {
    let config = test_config();
    let state = AppState { store };
    build_app_router(state, &config)
}

/// Router over a fresh in-memory store.
pub fn memory_app() -> Router {
    build_test_app(Arc::new(MemoryStore::new()))
}

/// Router over a fresh, migrated in-memory SQLite database.
pub async fn sqlite_app() -> Router {
    let pool = notebook_db::create_memory_pool().await.unwrap();
    notebook_db::run_migrations(&pool).await.unwrap();
    build_test_app(Arc::new(SqliteStore::new(pool)))
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Send a request and return its status and JSON body.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_json(response).await)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send_json(app, "POST", uri, body).await
}

pub async fn put_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send_json(app, "PUT", uri, body).await
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Create a notebook and return its id.
pub async fn create_notebook(app: &Router, name: &str) -> i64 {
    let (status, json) = post_json(app, "/api/notebooks", serde_json::json!({ "name": name })).await;
    assert_eq!(status, StatusCode::CREATED, "create notebook failed: {json}");
    json["id"].as_i64().unwrap()
}

/// Create a note and return its id.
pub async fn create_note(app: &Router, notebook_id: i64, title: &str, content: &str) -> i64 {
    let (status, json) = post_json(
        app,
        "/api/notes",
        serde_json::json!({ "notebookId": notebook_id, "title": title, "content": content }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create note failed: {json}");
    json["id"].as_i64().unwrap()
}
