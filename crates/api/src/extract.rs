//! Request extractors that reject with the JSON envelope.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` whose rejection is an [`AppError::BadRequest`].
///
/// Malformed or mistyped bodies therefore answer with the same envelope as
/// every other error instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
