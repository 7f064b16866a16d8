// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the adapters, the persona registry, and the session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Stable identifier of an interviewer persona.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonaId(pub String);

impl PersonaId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PersonaId {
    fn from(value: &str) -> Self {
        PersonaId(value.to_string())
    }
}

/// Unique identifier for a transcript message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        MessageId(uuid::Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Grammatical gender of a persona's speech, used to pick polite particles
/// and first-person pronouns in generated greetings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GenderTag {
    Masculine,
    Feminine,
}

/// Who wrote a transcript message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Interviewer,
    Candidate,
}

impl Role {
    /// The chat-completion role this sender maps to.
    pub fn chat_role(self) -> ChatRole {
        match self {
            Role::Interviewer => ChatRole::Assistant,
            Role::Candidate => ChatRole::User,
        }
    }
}

/// A single transcript entry. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: MessageId::generate(),
            role,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    pub fn interviewer(text: impl Into<String>) -> Self {
        Self::new(Role::Interviewer, text)
    }

    pub fn candidate(text: impl Into<String>) -> Self {
        Self::new(Role::Candidate, text)
    }
}

// --- Completion types ---

/// Role tag in the chat-completion wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A role-tagged message sent to the Completion Service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl From<&Message> for ChatMessage {
    fn from(msg: &Message) -> Self {
        ChatMessage {
            role: msg.role.chat_role(),
            content: msg.text.clone(),
        }
    }
}

/// A request for the next interviewer utterance.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Persona-derived system instruction.
    pub system_instruction: String,
    /// Full ordered transcript of the persona, role-mapped.
    pub messages: Vec<ChatMessage>,
    /// Job title the candidate is interviewing for.
    pub job_title: String,
}

/// Token accounting reported by the Completion Service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// A validated completion result.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Non-empty utterance text.
    pub text: String,
    pub model: String,
    pub usage: Option<TokenUsage>,
}

// --- Evaluation types ---

/// Rubric categories the evaluation prompt scores and the summary reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum RubricCategory {
    #[strum(to_string = "Job Relevance")]
    JobRelevance,
    #[strum(to_string = "Technical Expertise")]
    TechnicalExpertise,
    #[strum(to_string = "Communication")]
    Communication,
    #[strum(to_string = "Problem Solving")]
    ProblemSolving,
    #[strum(to_string = "Attitude & Learning")]
    AttitudeLearning,
}

impl RubricCategory {
    /// All categories in report order.
    pub const ALL: [RubricCategory; 5] = [
        RubricCategory::JobRelevance,
        RubricCategory::TechnicalExpertise,
        RubricCategory::Communication,
        RubricCategory::ProblemSolving,
        RubricCategory::AttitudeLearning,
    ];
}

/// A candidate answer to evaluate, with the question it answered.
#[derive(Debug, Clone)]
pub struct EvaluationRequest {
    pub answer: String,
    pub question: String,
    pub job_title: String,
}

/// Free-text advisory feedback.
#[derive(Debug, Clone)]
pub struct EvaluationResponse {
    pub feedback: String,
}

// --- Speech types ---

/// Text to synthesize with a given voice.
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    pub text: String,
    pub voice: String,
}

/// A playable audio resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechResponse {
    pub audio_url: String,
}
