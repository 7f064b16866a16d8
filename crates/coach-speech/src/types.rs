// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the text-to-speech endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct SynthesisRequest {
    pub text: String,
    pub speaker: String,
    pub language: String,
    pub speed: f64,
    pub volume: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisResponse {
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
