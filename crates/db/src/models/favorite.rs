//! Favorites: the user ↔ drug join entity.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use yakbot_core::types::{DbId, DrugId, Timestamp, UserId};

use crate::models::drug::Drug;

/// Full row from the `favorites` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Favorite {
    pub id: DbId,
    pub user_id: UserId,
    pub drug_id: DrugId,
    pub created_at: Timestamp,
}

/// Request body for adding a favorite.
#[derive(Debug, Deserialize)]
pub struct CreateFavorite {
    pub drug_id: DrugId,
}

/// Favorite projection with its drug embedded.
#[derive(Debug, Clone, Serialize)]
pub struct FavoriteWithDrug {
    pub id: DbId,
    pub user_id: UserId,
    pub drug_id: DrugId,
    pub created_at: Timestamp,
    pub drug: Drug,
}

impl FavoriteWithDrug {
    pub fn new(favorite: Favorite, drug: Drug) -> Self {
        Self {
            id: favorite.id,
            user_id: favorite.user_id,
            drug_id: favorite.drug_id,
            created_at: favorite.created_at,
            drug,
        }
    }
}

/// Flat join row used to load favorites and their drugs in one query.
#[derive(Debug, FromRow)]
pub(crate) struct FavoriteDrugRow {
    pub favorite_id: DbId,
    pub favorite_user_id: UserId,
    pub favorite_created_at: Timestamp,
    #[sqlx(flatten)]
    pub drug: Drug,
}

impl From<FavoriteDrugRow> for FavoriteWithDrug {
    fn from(row: FavoriteDrugRow) -> Self {
        Self {
            id: row.favorite_id,
            user_id: row.favorite_user_id,
            drug_id: row.drug.id.clone(),
            created_at: row.favorite_created_at,
            drug: row.drug,
        }
    }
}
