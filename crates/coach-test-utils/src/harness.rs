// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for session-level integration tests.
//!
//! `TestHarness` wires a [`ConversationSession`] to mock adapters over the
//! built-in persona catalog.

use std::sync::Arc;
use std::time::Duration;

use coach_core::{CoachError, PersonaId};
use coach_persona::PersonaRegistry;
use coach_session::{ConversationSession, InterviewState, SessionOptions};

use crate::mock_completion::MockCompletion;
use crate::mock_evaluator::MockEvaluator;
use crate::mock_speech::MockSpeech;

/// Builder for test sessions.
pub struct TestHarnessBuilder {
    completion: MockCompletion,
    evaluator: Option<MockEvaluator>,
    speech: Option<MockSpeech>,
    options: SessionOptions,
    persona: PersonaId,
    job_title: String,
    timeout: Option<Duration>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            completion: MockCompletion::new(),
            evaluator: None,
            speech: None,
            options: SessionOptions {
                conversational_cues: false,
                ..SessionOptions::default()
            },
            persona: PersonaId::from("1"),
            job_title: "Backend Engineer".to_string(),
            timeout: None,
        }
    }

    /// Scripted successful completion replies.
    pub fn with_replies(mut self, replies: &[&str]) -> Self {
        self.completion = MockCompletion::with_replies(replies.iter().map(|r| r.to_string()).collect());
        self
    }

    pub fn with_completion(mut self, completion: MockCompletion) -> Self {
        self.completion = completion;
        self
    }

    pub fn with_evaluator(mut self, evaluator: MockEvaluator) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    pub fn with_speech(mut self, speech: MockSpeech) -> Self {
        self.speech = Some(speech);
        self
    }

    pub fn with_options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_max_questions(mut self, max: u32) -> Self {
        self.options.max_questions = max;
        self
    }

    pub fn with_persona(mut self, persona: &str) -> Self {
        self.persona = PersonaId::from(persona);
        self
    }

    pub fn with_job_title(mut self, job_title: &str) -> Self {
        self.job_title = job_title.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<TestHarness, CoachError> {
        let registry = Arc::new(PersonaRegistry::builtin());
        let state = InterviewState::new(registry, self.persona, self.job_title, self.options)?;

        let completion = Arc::new(self.completion);
        let mut session = ConversationSession::new(state, completion.clone());

        let evaluator = self.evaluator.map(Arc::new);
        if let Some(evaluator) = &evaluator {
            session = session.with_evaluation(evaluator.clone());
        }
        let speech = self.speech.map(Arc::new);
        if let Some(speech) = &speech {
            session = session.with_speech(speech.clone());
        }
        if let Some(timeout) = self.timeout {
            session = session.with_timeout(timeout);
        }

        Ok(TestHarness {
            session: Arc::new(session),
            completion,
            evaluator,
            speech,
        })
    }
}

/// A session plus handles to its mock adapters.
pub struct TestHarness {
    pub session: Arc<ConversationSession>,
    pub completion: Arc<MockCompletion>,
    pub evaluator: Option<Arc<MockEvaluator>>,
    pub speech: Option<Arc<MockSpeech>>,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }
}
