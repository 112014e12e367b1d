//! Extractors whose rejections render as [`AppError`] JSON instead of
//! axum's plain-text defaults.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body. Malformed or mistyped bodies become a 400 `BAD_REQUEST`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query string parameters. Unparseable values (e.g. `isFavorite=maybe`)
/// become a 400 `BAD_REQUEST`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// Path parameters. Non-numeric ids become a 400 `BAD_REQUEST`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
