// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for an OpenAI-compatible chat completion endpoint.

use std::time::Duration;

use coach_core::CoachError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse};

/// HTTP client with bearer authentication and one retry on transient
/// statuses (429, 500, 503).
#[derive(Debug, Clone)]
pub struct TyphoonClient {
    client: reqwest::Client,
    url: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl TyphoonClient {
    /// Build a client posting to `url` (the full `chat/completions` URL).
    pub fn new(api_key: &SecretString, url: impl Into<String>) -> Result<Self, CoachError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
            .map_err(|e| CoachError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
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
            url: url.into(),
            max_retries: 1,
            retry_delay: Duration::from_secs(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send a non-streaming completion request.
    pub async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, CoachError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying completion request after transient error");
                tokio::time::sleep(self.retry_delay).await;
            }

            let response = self
                .client
                .post(&self.url)
                .json(request)
                .send()
                .await
                .map_err(|e| CoachError::Provider {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "completion response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| CoachError::Provider {
                    message: format!("failed to read response body: {e}"),
                    source: Some(Box::new(e)),
                })?;
                return serde_json::from_str(&body).map_err(|e| CoachError::Provider {
                    message: format!("failed to parse completion response: {e}"),
                    source: Some(Box::new(e)),
                });
            }

            let body = response.text().await.unwrap_or_default();
            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(CoachError::provider(format!("API returned {status}: {body}")));
                continue;
            }

            return Err(CoachError::provider(describe_error(status, &body)));
        }

        Err(last_error
            .unwrap_or_else(|| CoachError::provider("completion request failed after retries")))
    }
}

fn describe_error(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(api_err) => match api_err.error.type_ {
            Some(kind) => format!("completion API error ({kind}): {}", api_err.error.message),
            None => format!("completion API error ({status}): {}", api_err.error.message),
        },
        Err(_) => format!("API returned {status}: {body}"),
    }
}

/// Statuses worth one more attempt.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}
