//! The token → local user resolution chain.
//!
//! 1. Read `Authorization: Bearer <token>`.
//! 2. Verify it through the configured [`TokenVerifier`].
//! 3. Look the subject up in `users`.
//!
//! Failing steps 1–2 is `Unauthenticated`; failing step 3 is `NotRegistered`.
//! The two must stay distinguishable to clients (401 vs 404).

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use sqlx::PgPool;
use yakbot_core::error::CoreError;
use yakbot_db::models::user::UserResponse;
use yakbot_db::repositories::UserRepo;

use crate::auth::token::{TokenError, TokenVerifier, VerifiedIdentity};
use crate::error::{AppError, AppResult};

/// Extract the raw bearer token from request headers.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, CoreError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| CoreError::Unauthenticated("Missing Authorization header".into()))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            CoreError::Unauthenticated(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            )
        })
}

/// Steps 1–2: verify the caller's credential.
pub async fn verify_bearer(
    verifier: &dyn TokenVerifier,
    headers: &HeaderMap,
) -> Result<VerifiedIdentity, CoreError> {
    let token = bearer_token(headers)?;
    verifier.verify(token).await.map_err(|err| {
        match &err {
            TokenError::KeyFetch(_) => {
                tracing::error!(error = %err, "Identity provider keys unavailable")
            }
            _ => tracing::debug!(error = %err, "Rejected identity token"),
        }
        CoreError::Unauthenticated("Invalid or expired token".into())
    })
}

/// Step 3: map a verified identity onto its local profile.
pub async fn resolve_user(pool: &PgPool, identity: &VerifiedIdentity) -> AppResult<UserResponse> {
    let user = UserRepo::find_by_id(pool, &identity.subject)
        .await?
        .ok_or(AppError::Core(CoreError::NotRegistered))?;
    Ok(user.into())
}
