//! Repository for the `user_settings` table.

use sqlx::PgPool;
use yakbot_core::users::DEFAULT_SEARCH_TYPE;

use crate::models::user_setting::{UpdateUserSetting, UserSetting};

const COLUMNS: &str = "id, user_id, allergy_info, preferred_search_type, updated_at";

pub struct UserSettingRepo;

impl UserSettingRepo {
    /// Fetch a user's settings, creating the default row if it is missing.
    pub async fn get_or_create(pool: &PgPool, user_id: &str) -> Result<UserSetting, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_settings (user_id) \
             VALUES ($1) \
             ON CONFLICT (user_id) DO UPDATE SET user_id = user_settings.user_id \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSetting>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Apply a partial update. Only non-`None` fields are written.
    ///
    /// The default row is created first if the user has none yet.
    pub async fn update(
        pool: &PgPool,
        user_id: &str,
        input: &UpdateUserSetting,
    ) -> Result<UserSetting, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_settings (user_id, allergy_info, preferred_search_type) \
             VALUES ($1, COALESCE($2, ''), COALESCE($3, $4)) \
             ON CONFLICT (user_id) DO UPDATE SET \
                allergy_info = COALESCE($2, user_settings.allergy_info), \
                preferred_search_type = COALESCE($3, user_settings.preferred_search_type), \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSetting>(&query)
            .bind(user_id)
            .bind(&input.allergy_info)
            .bind(&input.preferred_search_type)
            .bind(DEFAULT_SEARCH_TYPE)
            .fetch_one(pool)
            .await
    }
}
