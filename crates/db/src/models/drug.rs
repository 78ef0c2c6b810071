//! Cached drug registry entries.

use serde::Serialize;
use sqlx::FromRow;
use yakbot_core::types::{DrugId, Timestamp};

/// Full row from the `drugs` table; also the API projection.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Drug {
    pub id: DrugId,
    pub name: String,
    pub company: Option<String>,
    pub ingredient: Option<String>,
    pub appearance: Option<String>,
    pub shape: Option<String>,
    pub effect: Option<String>,
    pub usage: Option<String>,
    pub caution_before_taking: Option<String>,
    pub caution_normal: Option<String>,
    pub interaction: Option<String>,
    pub side_effect: Option<String>,
    pub storage: Option<String>,
    pub image_url: Option<String>,
    pub updated_at: Timestamp,
}

/// Every field the feed ingestor maps from one upstream item.
///
/// An upsert overwrites all of them, so a field absent upstream is
/// cleared locally rather than kept from an older sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpsertDrug {
    pub id: DrugId,
    pub name: String,
    pub company: Option<String>,
    pub ingredient: Option<String>,
    pub appearance: Option<String>,
    pub shape: Option<String>,
    pub effect: Option<String>,
    pub usage: Option<String>,
    pub caution_before_taking: Option<String>,
    pub caution_normal: Option<String>,
    pub interaction: Option<String>,
    pub side_effect: Option<String>,
    pub storage: Option<String>,
    pub image_url: Option<String>,
}
