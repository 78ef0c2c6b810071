//! Handlers for drug search.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use validator::Validate;
use yakbot_core::drugs::MIN_KEYWORD_CHARS;
use yakbot_core::error::CoreError;
use yakbot_db::models::drug::Drug;
use yakbot_db::repositories::DrugRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// Query parameters for `GET /api/v1/drugs/search`.
#[derive(Debug, Deserialize, Validate)]
pub struct SearchParams {
    /// Missing keywords deserialize as empty and fail validation.
    #[serde(default)]
    #[validate(length(min = MIN_KEYWORD_CHARS, message = "must be at least 2 characters"))]
    pub keyword: String,
}

/// GET /api/v1/drugs/search?keyword=
///
/// Drugs whose name contains the keyword, capped at 100. Public.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<Drug>>> {
    params.validate().map_err(CoreError::from)?;

    let drugs = DrugRepo::search_by_name(&state.pool, &params.keyword).await?;
    tracing::debug!(keyword = %params.keyword, results = drugs.len(), "Drug search");
    Ok(Json(drugs))
}
