//! Axum route handlers for the extraction API.

use axum::{extract::Multipart, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extract::{extract_text, select_analysis_text};

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
}

/// POST /api/extract
///
/// Accepts a multipart `file` field holding a PDF and returns the cleaned
/// text, narrowed to the Experience section when one is labeled.
pub async fn handle_extract(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart request: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        if field.content_type() != Some("application/pdf") {
            return Err(AppError::Validation(
                "Please upload a valid PDF file.".to_string(),
            ));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read uploaded file: {e}")))?;
        info!("extracting text from uploaded PDF ({} bytes)", data.len());

        let text = extract_text(&data).map_err(|e| AppError::Extraction(e.to_string()))?;
        let selected = select_analysis_text(&text).to_string();

        return Ok(Json(ExtractResponse { text: selected }));
    }

    Err(AppError::Validation("A 'file' field is required.".to_string()))
}
