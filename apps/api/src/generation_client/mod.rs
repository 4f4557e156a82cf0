/// Generation client — the single point of entry for all generation-API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Cohere API directly.
/// All generation traffic MUST go through this module.
///
/// Model: command (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const COHERE_API_URL: &str = "https://api.cohere.ai/v1/generate";
const COHERE_VERSION: &str = "2022-12-06";
/// The model used for all generation calls.
pub const MODEL: &str = "command";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },
}

/// Per-call sampling knobs. Each pipeline step carries its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
struct GenerateRequestBody<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
    k: u32,
    stop_sequences: Vec<String>,
    return_likelihoods: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponseBody {
    #[serde(default)]
    generations: Vec<Generation>,
}

#[derive(Debug, Deserialize)]
struct Generation {
    text: Option<String>,
}

/// The generation backend seam. `CohereClient` is the production
/// implementation; tests substitute mocks to exercise the analysis
/// pipeline without a network.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        params: SamplingParams,
    ) -> Result<String, GenerationError>;
}

/// Cohere-backed generator used by the running service.
#[derive(Clone)]
pub struct CohereClient {
    client: Client,
    api_key: String,
}

impl CohereClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl Generator for CohereClient {
    /// Issues a single generate call. Every failure is terminal for the
    /// submission: there is no retry or backoff at this layer.
    async fn generate(
        &self,
        prompt: &str,
        params: SamplingParams,
    ) -> Result<String, GenerationError> {
        let request_body = GenerateRequestBody {
            model: MODEL,
            prompt,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            k: 0,
            stop_sequences: Vec::new(),
            return_likelihoods: "NONE",
        };

        let response = self
            .client
            .post(COHERE_API_URL)
            .bearer_auth(&self.api_key)
            .header("Cohere-Version", COHERE_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        debug!("generate call succeeded: {} response bytes", body.len());

        Ok(extract_generation_text(body))
    }
}

/// Pulls the first generation's text out of a successful response body.
/// A success body without the expected structure is returned verbatim
/// rather than treated as an error, so the caller always has something
/// to show.
fn extract_generation_text(body: String) -> String {
    match serde_json::from_str::<GenerateResponseBody>(&body) {
        Ok(parsed) => parsed
            .generations
            .into_iter()
            .next()
            .and_then(|g| g.text)
            .unwrap_or(body),
        Err(_) => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_first_generation_text() {
        let body = r#"{"generations": [{"text": "82% match"}, {"text": "ignored"}]}"#;
        assert_eq!(extract_generation_text(body.to_string()), "82% match");
    }

    #[test]
    fn test_empty_generations_falls_back_to_raw_body() {
        let body = r#"{"generations": []}"#;
        assert_eq!(extract_generation_text(body.to_string()), body);
    }

    #[test]
    fn test_missing_text_field_falls_back_to_raw_body() {
        let body = r#"{"generations": [{"finish_reason": "COMPLETE"}]}"#;
        assert_eq!(extract_generation_text(body.to_string()), body);
    }

    #[test]
    fn test_non_json_body_falls_back_to_raw_body() {
        let body = "upstream returned plain text";
        assert_eq!(extract_generation_text(body.to_string()), body);
    }

    #[test]
    fn test_request_body_matches_wire_contract() {
        let request = GenerateRequestBody {
            model: MODEL,
            prompt: "rate this resume",
            max_tokens: 400,
            temperature: 0.3,
            k: 0,
            stop_sequences: Vec::new(),
            return_likelihoods: "NONE",
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "command");
        assert_eq!(value["max_tokens"], 400);
        assert_eq!(value["k"], 0);
        assert_eq!(value["return_likelihoods"], "NONE");
        assert!(value["stop_sequences"].as_array().unwrap().is_empty());
    }
}
