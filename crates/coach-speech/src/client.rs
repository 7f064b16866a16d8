// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the text-to-speech endpoint.

use std::time::Duration;

use coach_core::CoachError;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::types::{SynthesisRequest, SynthesisResponse};

/// Header carrying the API token.
pub const TOKEN_HEADER: &str = "botnoi-token";

#[derive(Debug, Clone)]
pub struct SpeechClient {
    client: reqwest::Client,
    url: String,
}

impl SpeechClient {
    pub fn new(token: &SecretString, url: impl Into<String>) -> Result<Self, CoachError> {
        let mut headers = HeaderMap::new();
        let mut value = HeaderValue::from_str(token.expose_secret())
            .map_err(|e| CoachError::Config(format!("invalid speech token header value: {e}")))?;
        value.set_sensitive(true);
        headers.insert(TOKEN_HEADER, value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| CoachError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Single attempt; speech is best-effort and is not retried.
    pub async fn synthesize(
        &self,
        request: &SynthesisRequest,
    ) -> Result<SynthesisResponse, CoachError> {
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
        debug!(status = %status, "speech response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CoachError::provider(format!(
                "speech API returned {status}: {body}"
            )));
        }

        response
            .json::<SynthesisResponse>()
            .await
            .map_err(|e| CoachError::Provider {
                message: format!("failed to parse speech response: {e}"),
                source: Some(Box::new(e)),
            })
    }
}
