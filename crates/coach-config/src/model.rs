// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Coach interview engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use coach_core::GenderTag;
use serde::{Deserialize, Serialize};

/// Top-level Coach configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CoachConfig {
    /// Interview session behavior.
    #[serde(default)]
    pub session: SessionConfig,

    /// Completion Service (interviewer replies).
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Evaluation Service (advisory answer feedback).
    #[serde(default)]
    pub evaluation: EvaluationConfig,

    /// Speech Service (text-to-speech for interviewer replies).
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Additional interviewer personas, registered after the built-in catalog.
    #[serde(default)]
    pub personas: Vec<PersonaConfig>,
}

/// Interview session configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Number of interviewer questions after which a persona's interview ends.
    #[serde(default = "default_max_questions")]
    pub max_questions: u32,

    /// Whether `reset` discards the active persona's transcript.
    #[serde(default)]
    pub discard_on_reset: bool,

    /// Whether the persona may be switched while a completion is outstanding.
    #[serde(default)]
    pub allow_switch_while_awaiting: bool,

    /// Prefix successful replies with a random acknowledgement from the persona.
    #[serde(default = "default_conversational_cues")]
    pub conversational_cues: bool,

    /// Interviewer message appended when the Completion Service fails.
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,

    /// Deadline for every external call, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Candidate name used in the opening greeting.
    #[serde(default)]
    pub candidate_name: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            max_questions: default_max_questions(),
            discard_on_reset: false,
            allow_switch_while_awaiting: false,
            conversational_cues: default_conversational_cues(),
            fallback_message: default_fallback_message(),
            request_timeout_secs: default_request_timeout_secs(),
            candidate_name: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_questions() -> u32 {
    10
}

fn default_conversational_cues() -> bool {
    true
}

fn default_fallback_message() -> String {
    "⚠️ มีปัญหาในการเชื่อมต่อ กรุณาลองใหม่อีกครั้ง".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Completion Service configuration (OpenAI-compatible chat completions).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CompletionConfig {
    /// API key. `None` requires the `TYPHOON_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Full chat-completions endpoint URL.
    #[serde(default = "default_completion_url")]
    pub base_url: String,

    /// Model identifier.
    #[serde(default = "default_completion_model")]
    pub model: String,

    /// Maximum tokens to generate per reply.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Nucleus sampling mass.
    #[serde(default = "default_top_p")]
    pub top_p: f64,

    /// Repetition penalty. `None` omits the field from requests.
    #[serde(default = "default_repetition_penalty")]
    pub repetition_penalty: Option<f64>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_completion_url(),
            model: default_completion_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            repetition_penalty: default_repetition_penalty(),
        }
    }
}

fn default_completion_url() -> String {
    "https://api.opentyphoon.ai/v1/chat/completions".to_string()
}

fn default_completion_model() -> String {
    "typhoon-v1.5x-70b-instruct".to_string()
}

fn default_max_tokens() -> u32 {
    512
}

fn default_temperature() -> f64 {
    0.8
}

fn default_top_p() -> f64 {
    0.95
}

fn default_repetition_penalty() -> Option<f64> {
    Some(1.05)
}

/// Evaluation Service configuration (Gemini `generateContent`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EvaluationConfig {
    /// Request advisory feedback for every answer.
    #[serde(default)]
    pub enabled: bool,

    /// API key. `None` requires the `GEMINI_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL (the model path is appended).
    #[serde(default = "default_evaluation_url")]
    pub base_url: String,

    /// Model identifier.
    #[serde(default = "default_evaluation_model")]
    pub model: String,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: None,
            base_url: default_evaluation_url(),
            model: default_evaluation_model(),
        }
    }
}

fn default_evaluation_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_evaluation_model() -> String {
    "gemini-pro".to_string()
}

/// Speech Service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SpeechConfig {
    /// Synthesize audio for interviewer replies.
    #[serde(default)]
    pub enabled: bool,

    /// API token. `None` requires the `SPEECH_API_TOKEN` environment variable.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Full synthesis endpoint URL.
    #[serde(default = "default_speech_url")]
    pub base_url: String,

    /// Language code passed to the synthesizer.
    #[serde(default = "default_speech_language")]
    pub language: String,

    /// Playback speed multiplier.
    #[serde(default = "default_speech_speed")]
    pub speed: f64,

    /// Output volume multiplier.
    #[serde(default = "default_speech_volume")]
    pub volume: f64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_token: None,
            base_url: default_speech_url(),
            language: default_speech_language(),
            speed: default_speech_speed(),
            volume: default_speech_volume(),
        }
    }
}

fn default_speech_url() -> String {
    "https://api-voice.botnoi.ai/openapi/v1/generate_audio".to_string()
}

fn default_speech_language() -> String {
    "th".to_string()
}

fn default_speech_speed() -> f64 {
    1.0
}

fn default_speech_volume() -> f64 {
    1.0
}

/// An interviewer persona defined in configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PersonaConfig {
    /// Unique, stable identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Professional title.
    pub title: String,

    /// Employer label.
    pub company: String,

    /// Grammatical gender used for greeting phrasing.
    pub gender: GenderTag,

    /// Short style descriptor.
    pub style: String,

    /// Voice identifier for speech synthesis.
    pub voice: String,

    /// Personality traits folded into the system instruction.
    #[serde(default)]
    pub traits: Vec<String>,

    /// What the persona digs into with follow-up questions.
    #[serde(default)]
    pub follow_up_style: String,

    /// Short acknowledgements optionally prefixed to replies.
    #[serde(default)]
    pub conversational_cues: Vec<String>,
}
