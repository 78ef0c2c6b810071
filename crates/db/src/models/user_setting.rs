//! Per-user preferences (one row per user).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use yakbot_core::types::{DbId, Timestamp, UserId};

/// Full row from the `user_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSetting {
    #[serde(skip)]
    pub id: DbId,
    pub user_id: UserId,
    pub allergy_info: String,
    pub preferred_search_type: String,
    pub updated_at: Timestamp,
}

/// DTO for a partial settings update. `None` fields keep their value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserSetting {
    pub allergy_info: Option<String>,
    pub preferred_search_type: Option<String>,
}
