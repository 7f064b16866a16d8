// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for Gemini `models/{model}:generateContent`.

use std::time::Duration;

use coach_core::CoachError;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    max_retries: u32,
}

impl GeminiClient {
    pub fn new(
        api_key: &SecretString,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, CoachError> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(api_key.expose_secret())
            .map_err(|e| CoachError::Config(format!("invalid API key header value: {e}")))?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| CoachError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            max_retries: 1,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full endpoint URL for the configured model.
    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    pub async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, CoachError> {
        let url = self.endpoint();
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying evaluation request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&url)
                .json(request)
                .send()
                .await
                .map_err(|e| CoachError::Provider {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "evaluation response received");

            if status.is_success() {
                return response
                    .json::<GenerateContentResponse>()
                    .await
                    .map_err(|e| CoachError::Provider {
                        message: format!("failed to parse evaluation response: {e}"),
                        source: Some(Box::new(e)),
                    });
            }

            let body = response.text().await.unwrap_or_default();
            if matches!(status.as_u16(), 429 | 500 | 503) && attempt < self.max_retries {
                warn!(status = %status, "transient error, will retry");
                last_error = Some(CoachError::provider(format!("API returned {status}: {body}")));
                continue;
            }

            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "Gemini API error ({}): {}",
                    api_err.error.status.unwrap_or_else(|| status.to_string()),
                    api_err.error.message
                ),
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(CoachError::provider(message));
        }

        Err(last_error
            .unwrap_or_else(|| CoachError::provider("evaluation request failed after retries")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Content, Part};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part {
                    text: Some("evaluate".into()),
                }],
            }],
            generation_config: None,
        }
    }

    #[test]
    fn endpoint_joins_base_and_model() {
        let client =
            GeminiClient::new(&SecretString::from("k"), "https://g.test/v1beta/", "gemini-pro")
                .unwrap();
        assert_eq!(
            client.endpoint(),
            "https://g.test/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[tokio::test]
    async fn sends_key_header_to_model_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-pro:generateContent"))
            .and(header("x-goog-api-key", "gm-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"parts": [{"text": "ok"}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new(
            &SecretString::from("gm-key"),
            format!("{}/v1beta", server.uri()),
            "gemini-pro",
        )
        .unwrap();
        let resp = client.generate(&request()).await.unwrap();
        assert_eq!(resp.text().as_deref(), Some("ok"));
    }

    #[tokio::test]
    async fn api_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            GeminiClient::new(&SecretString::from("bad"), server.uri(), "gemini-pro").unwrap();
        let err = client.generate(&request()).await.unwrap_err().to_string();
        assert!(err.contains("INVALID_ARGUMENT"), "got: {err}");
    }
}
