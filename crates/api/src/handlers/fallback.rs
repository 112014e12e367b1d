//! JSON responses for requests no route handles.

use axum::http::{Method, Uri};

use crate::error::AppError;

/// Any path without a matching route.
pub async fn endpoint_not_found(method: Method, uri: Uri) -> AppError {
    tracing::debug!(%method, %uri, "No route for request");
    AppError::EndpointNotFound
}

/// A known path requested with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
