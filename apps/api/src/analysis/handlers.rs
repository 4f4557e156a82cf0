//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::run_analysis;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: String,
    /// Optional on the wire; an omitted title behaves as the empty string.
    #[serde(default)]
    pub job_title: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub match_result: String,
    pub feedback: String,
}

/// POST /api/analyze
///
/// Relays resume text through the two-call generation pipeline.
/// Preconditions run in order (request text, then credential) and the
/// upstream API is never contacted when either fails.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    info!(
        "analyze request received: text={} chars, job_title={:?}",
        request.text.chars().count(),
        request.job_title
    );

    if request.text.is_empty() {
        return Err(AppError::Validation("Text is required".to_string()));
    }

    let generator = state.generator.as_ref().ok_or_else(|| {
        AppError::Config(
            "Cohere API key is not configured. Please add COHERE_API_KEY to your \
             environment variables."
                .to_string(),
        )
    })?;

    let result = run_analysis(generator.as_ref(), &request.text, &request.job_title).await?;

    Ok(Json(AnalyzeResponse {
        match_result: result.match_result,
        feedback: result.feedback,
    }))
}
