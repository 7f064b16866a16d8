// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wiring from configuration to a live [`ConversationSession`].

use std::sync::Arc;
use std::time::Duration;

use coach_config::CoachConfig;
use coach_core::{CoachError, CompletionAdapter, EvaluationAdapter, PersonaId, SpeechAdapter};
use coach_gemini::GeminiEvaluator;
use coach_persona::PersonaRegistry;
use coach_session::{ConversationSession, InterviewState, SessionOptions};
use coach_speech::SpeechSynthesizer;
use coach_typhoon::TyphoonProvider;
use tracing::info;

/// Who the candidate talks to first, and about which position.
#[derive(Debug, Clone)]
pub struct SessionStart {
    pub persona: PersonaId,
    pub job_title: String,
    /// Overrides `session.candidate_name` when set.
    pub candidate_name: Option<String>,
}

/// The external services a session talks to.
pub struct Services {
    pub completion: Arc<dyn CompletionAdapter>,
    pub evaluation: Option<Arc<dyn EvaluationAdapter>>,
    pub speech: Option<Arc<dyn SpeechAdapter>>,
}

impl Services {
    /// Build the completion adapter plus whichever optional services are enabled.
    ///
    /// Missing credentials for an enabled service fail here, before the
    /// interview starts.
    pub fn from_config(config: &CoachConfig) -> Result<Self, CoachError> {
        let completion: Arc<dyn CompletionAdapter> =
            Arc::new(TyphoonProvider::new(&config.completion)?);

        let evaluation: Option<Arc<dyn EvaluationAdapter>> = if config.evaluation.enabled {
            Some(Arc::new(GeminiEvaluator::new(&config.evaluation)?))
        } else {
            None
        };

        let speech: Option<Arc<dyn SpeechAdapter>> = if config.speech.enabled {
            Some(Arc::new(SpeechSynthesizer::new(&config.speech)?))
        } else {
            None
        };

        info!(
            evaluation = evaluation.is_some(),
            speech = speech.is_some(),
            "external services configured"
        );

        Ok(Self {
            completion,
            evaluation,
            speech,
        })
    }
}

/// Registry of built-in plus configured personas.
pub fn build_registry(config: &CoachConfig) -> Result<Arc<PersonaRegistry>, CoachError> {
    Ok(Arc::new(PersonaRegistry::from_config(&config.personas)?))
}

/// Assemble a session that opens with `start.persona`'s greeting.
pub fn build_session(
    config: &CoachConfig,
    registry: Arc<PersonaRegistry>,
    start: SessionStart,
    services: Services,
) -> Result<ConversationSession, CoachError> {
    let mut options = SessionOptions::from(&config.session);
    if start.candidate_name.is_some() {
        options.candidate_name = start.candidate_name;
    }

    let state = InterviewState::new(registry, start.persona, start.job_title, options)?;

    let mut session = ConversationSession::new(state, services.completion)
        .with_timeout(Duration::from_secs(config.session.request_timeout_secs));
    if let Some(evaluation) = services.evaluation {
        session = session.with_evaluation(evaluation);
    }
    if let Some(speech) = services.speech {
        session = session.with_speech(speech);
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use coach_config::load_and_validate_str;
    use coach_core::Role;
    use coach_test_utils::{MockCompletion, MockEvaluator};
    use serial_test::serial;

    fn mock_services() -> Services {
        Services {
            completion: Arc::new(MockCompletion::with_replies(vec![
                "เล่าเรื่องโปรเจกต์ล่าสุดได้ไหมครับ?".to_string(),
            ])),
            evaluation: None,
            speech: None,
        }
    }

    fn start(persona: &str) -> SessionStart {
        SessionStart {
            persona: PersonaId::from(persona),
            job_title: "Backend Engineer".to_string(),
            candidate_name: None,
        }
    }

    #[test]
    fn registry_includes_configured_personas() {
        let config = load_and_validate_str(
            r#"
[[personas]]
id = "4"
name = "Ms. Ploy K."
title = "Product Lead"
company = "Startup Co."
gender = "feminine"
style = "curious"
voice = "th-female-2"
"#,
        )
        .unwrap();
        let registry = build_registry(&config).unwrap();
        assert_eq!(registry.len(), 4);
        assert!(registry.contains(&PersonaId::from("4")));
    }

    #[tokio::test]
    async fn session_opens_with_greeting_using_cli_name() {
        let mut config = CoachConfig::default();
        config.session.candidate_name = Some("Somchai".to_string());
        let registry = build_registry(&config).unwrap();

        let mut start = start("2");
        start.candidate_name = Some("Nok".to_string());
        let session = build_session(&config, registry, start, mock_services()).unwrap();

        let transcript = session.transcript().await;
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].role, Role::Interviewer);
        assert!(transcript[0].text.contains("Nok"));
        assert!(transcript[0].text.contains("Ms. Sabrina J."));
    }

    #[tokio::test]
    async fn session_honors_configured_question_cap() {
        let mut config = CoachConfig::default();
        config.session.max_questions = 1;
        config.session.conversational_cues = false;
        let registry = build_registry(&config).unwrap();
        let session = build_session(&config, registry, start("1"), mock_services()).unwrap();

        session.submit("ผมเป็น backend engineer ครับ").await.unwrap();
        assert_eq!(session.question_count().await, 1);
        assert!(session.evaluation_summary().await.is_some());
    }

    #[test]
    fn unknown_start_persona_is_rejected() {
        let config = CoachConfig::default();
        let registry = build_registry(&config).unwrap();
        let err = build_session(&config, registry, start("42"), mock_services())
            .err()
            .expect("persona 42 does not exist");
        assert!(matches!(err, CoachError::PersonaNotFound { .. }));
    }

    #[tokio::test]
    async fn evaluation_is_wired_when_present() {
        let config = CoachConfig::default();
        let registry = build_registry(&config).unwrap();
        let evaluator = Arc::new(MockEvaluator::with_feedback("Communication: 4/5"));
        let services = Services {
            evaluation: Some(evaluator.clone()),
            ..mock_services()
        };
        let session = build_session(&config, registry, start("1"), services).unwrap();

        let submitted = session.submit("สวัสดีครับ").await.unwrap();
        submitted.evaluation.unwrap().await.unwrap();
        assert_eq!(evaluator.requests().await.len(), 1);
    }

    #[test]
    #[serial]
    fn services_fail_without_completion_key() {
        // SAFETY: test-only env mutation, serialized with #[serial].
        unsafe { std::env::remove_var(coach_typhoon::API_KEY_ENV) };
        let config = CoachConfig::default();
        assert!(matches!(
            Services::from_config(&config),
            Err(CoachError::Config(_))
        ));
    }

    #[test]
    #[serial]
    fn disabled_services_are_not_built() {
        let mut config = CoachConfig::default();
        config.completion.api_key = Some("sk-test".to_string());
        let services = Services::from_config(&config).unwrap();
        assert!(services.evaluation.is_none());
        assert!(services.speech.is_none());
    }
}
