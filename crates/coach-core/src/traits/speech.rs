// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Speech adapter trait for text-to-speech endpoints.

use async_trait::async_trait;

use crate::error::CoachError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{SpeechRequest, SpeechResponse};

/// Adapter for the Speech Service that turns an utterance into a playable URL.
#[async_trait]
pub trait SpeechAdapter: PluginAdapter {
    /// Synthesizes `request.text` with `request.voice`.
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse, CoachError>;
}
