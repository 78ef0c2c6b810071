//! Repository for the `favorites` table.

use sqlx::PgPool;

use crate::models::favorite::{Favorite, FavoriteDrugRow, FavoriteWithDrug};

const COLUMNS: &str = "id, user_id, drug_id, created_at";

/// Join projection: favorite columns aliased, drug columns under their own names.
const JOIN_COLUMNS: &str = "f.id AS favorite_id, f.user_id AS favorite_user_id, \
                            f.created_at AS favorite_created_at, \
                            d.id, d.name, d.company, d.ingredient, d.appearance, d.shape, \
                            d.effect, d.usage, d.caution_before_taking, d.caution_normal, \
                            d.interaction, d.side_effect, d.storage, d.image_url, d.updated_at";

pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Insert a favorite. Fails on `uq_favorites_user_drug` if the pair exists
    /// and on the `drug_id` foreign key if the drug is unknown.
    pub async fn create(
        pool: &PgPool,
        user_id: &str,
        drug_id: &str,
    ) -> Result<Favorite, sqlx::Error> {
        let query = format!(
            "INSERT INTO favorites (user_id, drug_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Favorite>(&query)
            .bind(user_id)
            .bind(drug_id)
            .fetch_one(pool)
            .await
    }

    /// Check whether the user already saved this drug.
    pub async fn exists(pool: &PgPool, user_id: &str, drug_id: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM favorites WHERE user_id = $1 AND drug_id = $2)",
        )
        .bind(user_id)
        .bind(drug_id)
        .fetch_one(pool)
        .await
    }

    /// All favorites of a user with their drugs, oldest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Vec<FavoriteWithDrug>, sqlx::Error> {
        let query = format!(
            "SELECT {JOIN_COLUMNS} \
             FROM favorites f \
             JOIN drugs d ON d.id = f.drug_id \
             WHERE f.user_id = $1 \
             ORDER BY f.created_at, f.id"
        );
        let rows = sqlx::query_as::<_, FavoriteDrugRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(FavoriteWithDrug::from).collect())
    }
}
