//! Handlers for the signed-in user's favorite drugs.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use yakbot_core::error::CoreError;
use yakbot_db::models::favorite::{CreateFavorite, FavoriteWithDrug};
use yakbot_db::repositories::{DrugRepo, FavoriteRepo};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

/// POST /api/v1/drugs/favorites
///
/// An unknown drug id is a bad request; an existing (user, drug) pair is a
/// conflict. Concurrent duplicates are caught by `uq_favorites_user_drug`
/// and surface as the same conflict.
pub async fn add(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(input): AppJson<CreateFavorite>,
) -> AppResult<(StatusCode, Json<FavoriteWithDrug>)> {
    let drug = DrugRepo::find_by_id(&state.pool, &input.drug_id)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("Drug {} does not exist", input.drug_id)))?;

    if FavoriteRepo::exists(&state.pool, &user.id, &drug.id).await? {
        return Err(CoreError::Conflict(format!("Drug {} is already a favorite", drug.id)).into());
    }

    let favorite = FavoriteRepo::create(&state.pool, &user.id, &drug.id).await?;
    tracing::info!(user_id = %user.id, drug_id = %drug.id, "Favorite added");

    Ok((
        StatusCode::CREATED,
        Json(FavoriteWithDrug::new(favorite, drug)),
    ))
}

/// GET /api/v1/drugs/favorites
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<Vec<FavoriteWithDrug>>> {
    let favorites = FavoriteRepo::list_for_user(&state.pool, &user.id).await?;
    Ok(Json(favorites))
}
