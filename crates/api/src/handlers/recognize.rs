//! Pill-photo recognition.
//!
//! Recognition is not wired to a model yet: every well-formed upload gets the
//! same acetaminophen result so the mobile client can exercise the flow.

use axum::extract::Multipart;
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentUser;

/// One active ingredient of a recognized pill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ingredient {
    pub name: String,
    pub amount_mg: f64,
}

/// Result of recognizing a pill photo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PillRecognitionResponse {
    pub pill_name: String,
    pub pill_code: String,
    pub ingredients: Vec<Ingredient>,
    pub confidence: f64,
    pub color: String,
    pub shape: String,
    pub imprint: String,
    pub warnings: Vec<String>,
    /// Echo of the client-side OCR text, `null` when none was sent.
    pub recognized_text: Option<String>,
}

impl PillRecognitionResponse {
    /// The fixed result returned until a real recognizer is connected.
    pub fn placeholder(recognized_text: Option<String>) -> Self {
        Self {
            pill_name: "아세트아미노펜 650mg".into(),
            pill_code: "198804008".into(),
            ingredients: vec![Ingredient {
                name: "아세트아미노펜".into(),
                amount_mg: 650.0,
            }],
            confidence: 0.95,
            color: "흰색".into(),
            shape: "장방형".into(),
            imprint: "APAP 650".into(),
            warnings: vec!["심각한 간 질환 환자는 복용 금지".into()],
            recognized_text,
        }
    }
}

/// POST /api/v1/drugs/recognize
///
/// Accepts a multipart form with a required `file` field and an optional
/// `recognized_text` field.
pub async fn recognize(
    CurrentUser(user): CurrentUser,
    mut multipart: Multipart,
) -> AppResult<Json<PillRecognitionResponse>> {
    let mut image_bytes: Option<usize> = None;
    let mut recognized_text: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                image_bytes = Some(data.len());
            }
            "recognized_text" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                recognized_text = Some(text);
            }
            _ => {}
        }
    }

    let image_bytes =
        image_bytes.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    tracing::info!(user_id = %user.id, image_bytes, "Pill recognition requested");

    Ok(Json(PillRecognitionResponse::placeholder(recognized_text)))
}
