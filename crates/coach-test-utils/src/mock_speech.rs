// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock Speech Service adapter.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use coach_core::types::{SpeechRequest, SpeechResponse};
use coach_core::{CoachError, HealthStatus, PluginAdapter, SpeechAdapter};

/// Hands out `https://audio.test/<n>.mp3` URLs, or always fails.
pub struct MockSpeech {
    fail: bool,
    requests: Arc<Mutex<Vec<SpeechRequest>>>,
}

impl MockSpeech {
    pub fn new() -> Self {
        Self {
            fail: false,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub async fn requests(&self) -> Vec<SpeechRequest> {
        self.requests.lock().await.clone()
    }
}

impl Default for MockSpeech {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockSpeech {
    fn name(&self) -> &str {
        "mock-speech"
    }

    async fn health_check(&self) -> Result<HealthStatus, CoachError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl SpeechAdapter for MockSpeech {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse, CoachError> {
        let mut requests = self.requests.lock().await;
        requests.push(request);
        if self.fail {
            return Err(CoachError::provider("mock speech failure"));
        }
        Ok(SpeechResponse {
            audio_url: format!("https://audio.test/{}.mp3", requests.len()),
        })
    }
}
