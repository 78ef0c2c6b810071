//! Bearer-token extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use yakbot_db::models::user::UserResponse;

pub use crate::auth::token::VerifiedIdentity;

use crate::auth::identity::{resolve_user, verify_bearer};
use crate::error::AppError;
use crate::state::AppState;

/// A verified identity token whose subject may not have a profile yet.
///
/// Used by registration, which must accept unregistered callers:
///
/// ```ignore
/// async fn register(identity: VerifiedIdentity) -> AppResult<Json<()>> {
///     tracing::info!(subject = %identity.subject, "registering");
///     Ok(Json(()))
/// }
/// ```
impl FromRequestParts<AppState> for VerifiedIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(verify_bearer(state.verifier.as_ref(), &parts.headers).await?)
    }
}

/// The registered user acting on this request.
///
/// Rejects with 401 for a bad credential and 404 `NOT_REGISTERED` when the
/// credential is fine but no local profile exists.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserResponse);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = VerifiedIdentity::from_request_parts(parts, state).await?;
        let user = resolve_user(&state.pool, &identity).await?;
        Ok(CurrentUser(user))
    }
}
