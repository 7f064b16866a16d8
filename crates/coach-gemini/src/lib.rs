// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Evaluation Service adapter backed by Gemini.
//!
//! Each candidate answer is graded against the five-category rubric. The
//! feedback is advisory; the session swallows failures.

pub mod client;
pub mod prompt;
pub mod types;

use async_trait::async_trait;
use coach_config::model::EvaluationConfig;
use coach_core::traits::{EvaluationAdapter, PluginAdapter};
use coach_core::types::{EvaluationRequest, EvaluationResponse, HealthStatus};
use coach_core::CoachError;
use secrecy::SecretString;
use tracing::{debug, info};

use crate::client::GeminiClient;
use crate::types::{Content, GenerateContentRequest, GenerationConfig, Part};

/// Environment variable consulted when `evaluation.api_key` is unset.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Gemini-backed evaluator implementing [`EvaluationAdapter`].
pub struct GeminiEvaluator {
    client: GeminiClient,
}

impl GeminiEvaluator {
    /// API key resolution order: config -> `GEMINI_API_KEY` env var -> error.
    pub fn new(config: &EvaluationConfig) -> Result<Self, CoachError> {
        let api_key = resolve_api_key(config.api_key.as_deref())?;
        let client = GeminiClient::new(&api_key, config.base_url.clone(), config.model.clone())?;
        info!(model = %config.model, "evaluation provider initialized");
        Ok(Self { client })
    }

    fn to_api_request(request: &EvaluationRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt::evaluation_prompt(request)),
                }],
            }],
            generation_config: Some(GenerationConfig {
                temperature: 0.4,
                max_output_tokens: 1024,
            }),
        }
    }
}

#[async_trait]
impl PluginAdapter for GeminiEvaluator {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn health_check(&self) -> Result<HealthStatus, CoachError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl EvaluationAdapter for GeminiEvaluator {
    async fn evaluate(&self, request: EvaluationRequest) -> Result<EvaluationResponse, CoachError> {
        let response = self.client.generate(&Self::to_api_request(&request)).await?;

        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Err(CoachError::provider(format!(
                "evaluation prompt blocked: {reason}"
            )));
        }

        let feedback = response
            .text()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| CoachError::provider("evaluation response has no candidate text"))?;

        debug!(model = self.client.model(), chars = feedback.chars().count(), "evaluation received");
        Ok(EvaluationResponse { feedback })
    }
}

fn resolve_api_key(config_key: Option<&str>) -> Result<SecretString, CoachError> {
    if let Some(key) = config_key.filter(|k| !k.is_empty()) {
        return Ok(SecretString::from(key));
    }

    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.is_empty() => Ok(SecretString::from(key)),
        _ => Err(CoachError::Config(format!(
            "evaluation API key not found. Set evaluation.api_key in config or the {API_KEY_ENV} environment variable."
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn evaluator(base_url: &str) -> GeminiEvaluator {
        GeminiEvaluator::new(&EvaluationConfig {
            enabled: true,
            api_key: Some("gm-test".into()),
            base_url: base_url.to_string(),
            ..EvaluationConfig::default()
        })
        .unwrap()
    }

    fn request() -> EvaluationRequest {
        EvaluationRequest {
            answer: "I fixed a race in our job queue.".into(),
            question: "Can you describe a challenging bug you fixed?".into(),
            job_title: "Backend Engineer".into(),
        }
    }

    #[tokio::test]
    async fn evaluate_returns_joined_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"parts": [
                    {"text": "Job Relevance: 4/5\n"},
                    {"text": "Communication: 5/5\nดีมากครับ"}
                ]}, "finishReason": "STOP"}]
            })))
            .mount(&server)
            .await;

        let feedback = evaluator(&server.uri()).evaluate(request()).await.unwrap().feedback;
        assert_eq!(feedback, "Job Relevance: 4/5\nCommunication: 5/5\nดีมากครับ");
    }

    #[tokio::test]
    async fn blocked_prompt_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "promptFeedback": {"blockReason": "SAFETY"}
            })))
            .mount(&server)
            .await;

        let err = evaluator(&server.uri()).evaluate(request()).await.unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[tokio::test]
    async fn empty_candidate_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"parts": []}}]
            })))
            .mount(&server)
            .await;

        assert!(evaluator(&server.uri()).evaluate(request()).await.is_err());
    }

    #[test]
    fn api_request_embeds_prompt() {
        let api = GeminiEvaluator::to_api_request(&request());
        let text = api.contents[0].parts[0].text.as_deref().unwrap();
        assert!(text.contains("I fixed a race in our job queue."));
    }

    #[test]
    #[serial]
    fn missing_api_key_is_a_config_error() {
        // SAFETY: test-only env mutation, serialized with #[serial].
        unsafe { std::env::remove_var(API_KEY_ENV) };
        let err = resolve_api_key(None).unwrap_err();
        assert!(err.to_string().contains(API_KEY_ENV));
    }
}
