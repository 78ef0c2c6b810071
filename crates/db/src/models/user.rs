//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use yakbot_core::types::{Timestamp, UserId};

/// Full row from the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: UserId,
    pub nickname: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public projection of a user: the acting identity handed to handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub nickname: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            nickname: user.nickname,
        }
    }
}

/// DTO for registering a new user.
#[derive(Debug)]
pub struct CreateUser {
    /// Subject id taken from the verified identity token.
    pub id: UserId,
    pub nickname: String,
}
