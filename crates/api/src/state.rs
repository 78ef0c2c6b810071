use std::sync::Arc;

use crate::auth::token::TokenVerifier;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool. Each query checks a connection out and
    /// returns it when the future completes or is dropped.
    pub pool: yakbot_db::DbPool,
    /// Identity-token verifier (Firebase in production).
    pub verifier: Arc<dyn TokenVerifier>,
}
