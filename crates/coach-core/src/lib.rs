// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Coach mock-interview engine.
//!
//! This crate provides the trait definitions, error types, and common types
//! shared by the session state machine and the external service adapters.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::CoachError;
pub use types::{
    ChatMessage, ChatRole, GenderTag, HealthStatus, Message, MessageId, PersonaId, Role,
    RubricCategory,
};

pub use traits::{CompletionAdapter, EvaluationAdapter, PluginAdapter, SpeechAdapter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coach_error_variants_render() {
        let config = CoachError::Config("missing key".into());
        assert_eq!(config.to_string(), "configuration error: missing key");

        let provider = CoachError::provider("API returned 500");
        assert_eq!(provider.to_string(), "provider error: API returned 500");

        let not_found = CoachError::PersonaNotFound { id: "9".into() };
        assert_eq!(not_found.to_string(), "persona not found: 9");

        let timeout = CoachError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
        assert!(timeout.to_string().contains("30s"));
    }

    #[test]
    fn gender_tag_round_trips_through_strings() {
        use std::str::FromStr;

        for tag in [GenderTag::Masculine, GenderTag::Feminine] {
            assert_eq!(GenderTag::from_str(&tag.to_string()).unwrap(), tag);
        }
    }

    #[test]
    fn roles_map_to_chat_roles() {
        assert_eq!(Role::Interviewer.chat_role(), ChatRole::Assistant);
        assert_eq!(Role::Candidate.chat_role(), ChatRole::User);

        let msg = Message::candidate("I have 5 years of experience.");
        let chat = ChatMessage::from(&msg);
        assert_eq!(chat.role, ChatRole::User);
        assert_eq!(chat.content, "I have 5 years of experience.");
    }

    #[test]
    fn chat_role_serializes_lowercase() {
        let json = serde_json::to_string(&ChatRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }

    #[test]
    fn gender_tag_parses_lowercase() {
        let tag: GenderTag = serde_json::from_str("\"feminine\"").unwrap();
        assert_eq!(tag, GenderTag::Feminine);
        assert_eq!(GenderTag::Masculine.to_string(), "masculine");
    }

    #[test]
    fn message_ids_are_unique() {
        let a = Message::interviewer("hello");
        let b = Message::interviewer("hello");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn rubric_categories_display_labels() {
        let labels: Vec<String> = RubricCategory::ALL.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            labels,
            vec![
                "Job Relevance",
                "Technical Expertise",
                "Communication",
                "Problem Solving",
                "Attitude & Learning"
            ]
        );
    }

    #[test]
    fn all_traits_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_completion_adapter<T: CompletionAdapter>() {}
        fn _assert_evaluation_adapter<T: EvaluationAdapter>() {}
        fn _assert_speech_adapter<T: SpeechAdapter>() {}
    }
}
