//! Repository for the `users` table.

use sqlx::PgPool;
use yakbot_core::users::DEFAULT_SEARCH_TYPE;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, nickname, created_at, updated_at";

/// Provides lookups and registration for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user together with its default settings row.
    ///
    /// Both rows are written in one transaction. A second registration for
    /// the same subject fails on the primary key; a taken nickname fails on
    /// `uq_users_nickname`.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO users (id, nickname)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&input.id)
            .bind(&input.nickname)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO user_settings (user_id, preferred_search_type) VALUES ($1, $2)")
            .bind(&user.id)
            .bind(DEFAULT_SEARCH_TYPE)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(user)
    }

    /// Find a user by identity-provider subject id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Check whether a nickname is already taken.
    pub async fn nickname_exists(pool: &PgPool, nickname: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE nickname = $1)")
            .bind(nickname)
            .fetch_one(pool)
            .await
    }
}
