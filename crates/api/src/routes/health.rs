use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Root welcome payload.
#[derive(Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
}

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` or `error`.
    pub status: &'static str,
    /// `success` or `failure`.
    pub database_connection: &'static str,
    pub message: String,
}

/// GET / -- welcome message.
async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the Yakbot API",
    })
}

/// GET /health -- returns 500 when the database is unreachable.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match yakbot_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                database_connection: "success",
                message: "Successfully connected to PostgreSQL server.".to_string(),
            }),
        ),
        Err(err) => {
            tracing::error!(error = %err, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse {
                    status: "error",
                    database_connection: "failure",
                    message: format!("Database connection failed: {err}"),
                }),
            )
        }
    }
}

/// Mount root-level routes (NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health_check))
}
