//! Request-body extractors that reject with [`AppError`].

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` whose rejection is the API's `{error, code}` 400 body
/// instead of axum's plain-text 400/415/422.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
