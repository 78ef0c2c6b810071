//! Handlers for the `/users` resource (registration, profile, settings).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;
use yakbot_core::error::CoreError;
use yakbot_core::users::{validate_search_type, MAX_NICKNAME_CHARS};
use yakbot_db::models::user::{CreateUser, UserResponse};
use yakbot_db::models::user_setting::{UpdateUserSetting, UserSetting};
use yakbot_db::repositories::{UserRepo, UserSettingRepo};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::{CurrentUser, VerifiedIdentity};
use crate::state::AppState;

/// Request body for `POST /users/`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(length(min = 1, max = MAX_NICKNAME_CHARS, message = "must be 1 to 50 characters"))]
    pub nickname: String,
}

/// POST /users/
///
/// Create the local profile for a verified identity. Registering twice is a
/// conflict; the existing row is left untouched.
pub async fn register(
    State(state): State<AppState>,
    identity: VerifiedIdentity,
    AppJson(input): AppJson<RegisterUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let input = RegisterUserRequest {
        nickname: input.nickname.trim().to_string(),
    };
    input.validate().map_err(CoreError::from)?;

    if UserRepo::find_by_id(&state.pool, &identity.subject).await?.is_some() {
        return Err(CoreError::Conflict("User already registered.".into()).into());
    }
    if UserRepo::nickname_exists(&state.pool, &input.nickname).await? {
        return Err(CoreError::Conflict("Nickname already taken.".into()).into());
    }

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            id: identity.subject,
            nickname: input.nickname,
        },
    )
    .await?;
    tracing::info!(user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users/me
pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user)
}

/// GET /users/me/settings
pub async fn get_settings(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<UserSetting>> {
    let settings = UserSettingRepo::get_or_create(&state.pool, &user.id).await?;
    Ok(Json(settings))
}

/// PATCH /users/me/settings
pub async fn update_settings(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(input): AppJson<UpdateUserSetting>,
) -> AppResult<Json<UserSetting>> {
    if let Some(search_type) = &input.preferred_search_type {
        validate_search_type(search_type)?;
    }
    let settings = UserSettingRepo::update(&state.pool, &user.id, &input).await?;
    Ok(Json(settings))
}
