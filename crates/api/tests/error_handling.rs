//! Tests for `AppError` → HTTP response mapping and router-level failures.
//!
//! The first half calls `IntoResponse` directly on `AppError` values; the
//! second half drives malformed requests through the full router.

mod common;

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{middleware, Router};
use http_body_util::BodyExt;
use notebook_api::error::{panic_response, AppError};
use notebook_api::router::timeout_as_json;
use notebook_core::error::CoreError;
use notebook_db::store::StoreError;

/// Convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: CoreError::NotFound maps to 404 with NOT_FOUND code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Note",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Note with id 42 not found");
}

#[tokio::test]
async fn trashed_note_not_found_has_trash_message() {
    let err = AppError::Core(CoreError::trashed_note_not_found(7));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Note with id 7 is not in trash");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Validation maps to 400 with VALIDATION_ERROR code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_400() {
    let err: AppError = StoreError::from(CoreError::Validation("Notebook name is required".into())).into();

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Notebook name is required");
}

// ---------------------------------------------------------------------------
// Test: internal errors are sanitized
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("disk path /var/secret leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn database_error_returns_500() {
    let err: AppError = StoreError::from(sqlx::Error::PoolTimedOut).into();

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn panic_returns_json_500() {
    let response = panic_response(Box::new("index out of bounds"));
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn timeout_returns_json_408() {
    let app = Router::new()
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                "done"
            }),
        )
        .layer(tower_http::timeout::TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_millis(20),
        ))
        .layer(middleware::from_fn(timeout_as_json));

    let request = Request::builder().uri("/slow").body(Body::empty()).unwrap();
    let (status, json) = common::send(&app, request).await;

    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(json["code"], "REQUEST_TIMEOUT");
    assert_eq!(json["error"], "Request timed out");
}

// ---------------------------------------------------------------------------
// Test: router-level failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_endpoint_returns_json_404() {
    let app = common::memory_app();

    let (status, json) = common::get(&app, "/api/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Endpoint not found");
}

#[tokio::test]
async fn wrong_method_returns_json_405() {
    let app = common::memory_app();

    let (status, json) = common::delete(&app, "/api/tags").await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json["error"], "Method not allowed");
    assert_eq!(json["code"], "METHOD_NOT_ALLOWED");
}

#[tokio::test]
async fn malformed_json_returns_400() {
    let app = common::memory_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/notebooks")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, json) = common::send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn missing_content_type_returns_400() {
    let app = common::memory_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/notebooks")
        .body(Body::from(r#"{"name":"x"}"#))
        .unwrap();
    let (status, json) = common::send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn non_numeric_id_returns_400() {
    let app = common::memory_app();

    let (status, json) = common::get(&app, "/api/notes/abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
}
