use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation_client::GenerationError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Generation API error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Extraction(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_ERROR",
                msg.clone(),
            ),
            AppError::Config(msg) => {
                tracing::error!("Configuration error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR", msg.clone())
            }
            AppError::Upstream { status, body } => {
                tracing::error!("Upstream generation error {status}: {body}");
                (
                    // Mirror the upstream status; 502 if it is not a valid code.
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                    "UPSTREAM_ERROR",
                    format!("Cohere API error: {status} - {body}"),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Error analyzing resume. Please try again.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Api { status, body } => AppError::Upstream { status, body },
            GenerationError::Http(e) => AppError::Internal(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400() {
        let response = AppError::Validation("Text is required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_config_maps_to_500() {
        let response = AppError::Config("missing key".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_extraction_maps_to_422() {
        let response = AppError::Extraction("unreadable".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_upstream_mirrors_status_code() {
        let response = AppError::Upstream {
            status: 503,
            body: "overloaded".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_upstream_invalid_status_falls_back_to_502() {
        let response = AppError::Upstream {
            status: 42,
            body: "nonsense".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_api_generation_error_becomes_upstream() {
        let err: AppError = GenerationError::Api {
            status: 429,
            body: "rate limited".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Upstream { status: 429, .. }));
    }
}
