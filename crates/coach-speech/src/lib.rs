// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Speech Service adapter.
//!
//! Posts the interviewer utterance to a JSON text-to-speech endpoint and
//! returns the URL of the generated audio.

pub mod client;
pub mod types;

use async_trait::async_trait;
use coach_config::model::SpeechConfig;
use coach_core::traits::{PluginAdapter, SpeechAdapter};
use coach_core::types::{HealthStatus, SpeechRequest, SpeechResponse};
use coach_core::CoachError;
use reqwest::Url;
use secrecy::SecretString;
use tracing::{debug, info};

use crate::client::SpeechClient;
use crate::types::SynthesisRequest;

/// Environment variable consulted when `speech.api_token` is unset.
pub const API_TOKEN_ENV: &str = "SPEECH_API_TOKEN";

/// Maximum text size sent for synthesis (8 KiB).
const MAX_INPUT_BYTES: usize = 8 * 1024;

pub struct SpeechSynthesizer {
    client: SpeechClient,
    language: String,
    speed: f64,
    volume: f64,
}

impl SpeechSynthesizer {
    /// Token resolution order: config -> `SPEECH_API_TOKEN` env var -> error.
    pub fn new(config: &SpeechConfig) -> Result<Self, CoachError> {
        let token = resolve_token(config.api_token.as_deref())?;
        let client = SpeechClient::new(&token, config.base_url.clone())?;
        info!(language = %config.language, "speech provider initialized");
        Ok(Self {
            client,
            language: config.language.clone(),
            speed: config.speed,
            volume: config.volume,
        })
    }
}

#[async_trait]
impl PluginAdapter for SpeechSynthesizer {
    fn name(&self) -> &str {
        "speech"
    }

    async fn health_check(&self) -> Result<HealthStatus, CoachError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl SpeechAdapter for SpeechSynthesizer {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse, CoachError> {
        if request.text.trim().is_empty() {
            return Err(CoachError::provider("nothing to synthesize"));
        }
        if request.text.len() > MAX_INPUT_BYTES {
            return Err(CoachError::provider(format!(
                "text exceeds maximum size: {} bytes (limit: {MAX_INPUT_BYTES} bytes)",
                request.text.len()
            )));
        }

        let api_request = SynthesisRequest {
            text: request.text,
            speaker: request.voice,
            language: self.language.clone(),
            speed: self.speed,
            volume: self.volume,
        };
        let response = self.client.synthesize(&api_request).await?;

        let audio_url = response.audio_url.ok_or_else(|| {
            CoachError::provider(format!(
                "speech response has no audio_url{}",
                response
                    .message
                    .map(|m| format!(": {m}"))
                    .unwrap_or_default()
            ))
        })?;
        validate_audio_url(&audio_url)?;

        debug!(speaker = %api_request.speaker, "speech synthesized");
        Ok(SpeechResponse { audio_url })
    }
}

/// Only absolute http(s) URLs are playable.
fn validate_audio_url(raw: &str) -> Result<(), CoachError> {
    let url = Url::parse(raw).map_err(|e| CoachError::Provider {
        message: format!("invalid audio_url `{raw}`: {e}"),
        source: Some(Box::new(e)),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(CoachError::provider(format!(
            "audio_url has unsupported scheme `{other}`"
        ))),
    }
}

fn resolve_token(config_token: Option<&str>) -> Result<SecretString, CoachError> {
    if let Some(token) = config_token.filter(|t| !t.is_empty()) {
        return Ok(SecretString::from(token));
    }

    match std::env::var(API_TOKEN_ENV) {
        Ok(token) if !token.is_empty() => Ok(SecretString::from(token)),
        _ => Err(CoachError::Config(format!(
            "speech API token not found. Set speech.api_token in config or the {API_TOKEN_ENV} environment variable."
        ))),
    }
}
