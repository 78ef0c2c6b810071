//! Repository for the `drugs` cache table.

use sqlx::PgPool;
use yakbot_core::drugs::{substring_pattern, SEARCH_RESULT_LIMIT};

use crate::models::drug::{Drug, UpsertDrug};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, company, ingredient, appearance, shape, effect, \
                          usage, caution_before_taking, caution_normal, interaction, \
                          side_effect, storage, image_url, updated_at";

/// Provides the ingestor's upsert and the API's read paths.
pub struct DrugRepo;

impl DrugRepo {
    /// Insert a drug or overwrite every mapped field of the existing row
    /// with the same item code, stamping `updated_at` with the current time.
    pub async fn upsert(pool: &PgPool, input: &UpsertDrug) -> Result<Drug, sqlx::Error> {
        let query = format!(
            "INSERT INTO drugs (id, name, company, ingredient, appearance, shape, effect, usage, \
                                caution_before_taking, caution_normal, interaction, side_effect, \
                                storage, image_url, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, NOW()) \
             ON CONFLICT (id) DO UPDATE SET \
                name = EXCLUDED.name, \
                company = EXCLUDED.company, \
                ingredient = EXCLUDED.ingredient, \
                appearance = EXCLUDED.appearance, \
                shape = EXCLUDED.shape, \
                effect = EXCLUDED.effect, \
                usage = EXCLUDED.usage, \
                caution_before_taking = EXCLUDED.caution_before_taking, \
                caution_normal = EXCLUDED.caution_normal, \
                interaction = EXCLUDED.interaction, \
                side_effect = EXCLUDED.side_effect, \
                storage = EXCLUDED.storage, \
                image_url = EXCLUDED.image_url, \
                updated_at = EXCLUDED.updated_at \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Drug>(&query)
            .bind(&input.id)
            .bind(&input.name)
            .bind(&input.company)
            .bind(&input.ingredient)
            .bind(&input.appearance)
            .bind(&input.shape)
            .bind(&input.effect)
            .bind(&input.usage)
            .bind(&input.caution_before_taking)
            .bind(&input.caution_normal)
            .bind(&input.interaction)
            .bind(&input.side_effect)
            .bind(&input.storage)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    /// Find a drug by registry item code.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Drug>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM drugs WHERE id = $1");
        sqlx::query_as::<_, Drug>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Drugs whose name contains `keyword` literally (ASCII case-insensitive), at most
    /// [`SEARCH_RESULT_LIMIT`] rows, ordered by item code.
    pub async fn search_by_name(pool: &PgPool, keyword: &str) -> Result<Vec<Drug>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM drugs \
             WHERE name ILIKE $1 ESCAPE '\\' \
             ORDER BY id \
             LIMIT $2"
        );
        sqlx::query_as::<_, Drug>(&query)
            .bind(substring_pattern(keyword))
            .bind(SEARCH_RESULT_LIMIT)
            .fetch_all(pool)
            .await
    }

    /// Total number of cached drugs.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM drugs")
            .fetch_one(pool)
            .await
    }
}
