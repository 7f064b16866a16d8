// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Synchronous interview state machine.
//!
//! `InterviewState` owns every transcript, counter and advisory record of a
//! session. It never performs I/O: [`InterviewState::begin_turn`] hands out
//! the request to send, and [`InterviewState::finish_turn`] applies whatever
//! the Completion Service returned. The async driver in
//! [`crate::session`] sits between the two.
//!
//! Transitions:
//!
//! ```text
//! Active --begin_turn--> AwaitingResponse
//! AwaitingResponse --finish_turn(Ok)--> Active | Terminated
//! AwaitingResponse --finish_turn(Err)--> Active (fallback message)
//! Active | Terminated --switch_persona--> Active | Terminated (per persona)
//! Active | Terminated --reset--> Active
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use coach_config::model::SessionConfig;
use coach_core::types::{CompletionRequest, EvaluationRequest};
use coach_core::{ChatMessage, CoachError, Message, MessageId, PersonaId, Role};
use coach_persona::{
    greeting, system_instruction, GreetingContext, GreetingKind, Persona, PersonaRegistry,
};
use tracing::{debug, info, warn};

use crate::classifier::is_question;
use crate::error::SessionError;
use crate::rubric::EvaluationSummary;
use crate::transcript::TranscriptStore;

/// Observable phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Accepting candidate input.
    Active,
    /// A completion request is outstanding.
    AwaitingResponse,
    /// The active persona reached its question cap.
    Terminated,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Active => write!(f, "active"),
            Phase::AwaitingResponse => write!(f, "awaiting-response"),
            Phase::Terminated => write!(f, "terminated"),
        }
    }
}

/// Audio availability for one interviewer message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioStatus {
    Pending,
    Ready(String),
    Unavailable,
}

/// Behavior switches for a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub max_questions: u32,
    pub discard_on_reset: bool,
    pub allow_switch_while_awaiting: bool,
    pub conversational_cues: bool,
    pub fallback_message: String,
    pub candidate_name: Option<String>,
}

impl From<&SessionConfig> for SessionOptions {
    fn from(config: &SessionConfig) -> Self {
        Self {
            max_questions: config.max_questions,
            discard_on_reset: config.discard_on_reset,
            allow_switch_while_awaiting: config.allow_switch_while_awaiting,
            conversational_cues: config.conversational_cues,
            fallback_message: config.fallback_message.clone(),
            candidate_name: config.candidate_name.clone(),
        }
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::from(&SessionConfig::default())
    }
}

#[derive(Debug, Default, Clone)]
struct PersonaProgress {
    questions: u32,
    summary: Option<EvaluationSummary>,
}

/// Proof of the single outstanding completion. Consumed by `finish_turn`.
#[derive(Debug)]
pub struct TurnTicket {
    persona: PersonaId,
    answer_id: MessageId,
}

impl TurnTicket {
    /// The persona that issued the request.
    pub fn persona(&self) -> &PersonaId {
        &self.persona
    }

    /// The candidate message this turn answers.
    pub fn answer_id(&self) -> &MessageId {
        &self.answer_id
    }
}

/// Everything the driver needs to perform one turn.
#[derive(Debug)]
pub struct PendingTurn {
    pub ticket: TurnTicket,
    pub request: CompletionRequest,
    pub evaluation: EvaluationRequest,
    /// Voice of the issuing persona, for speech synthesis of the reply.
    pub voice: String,
}

/// Result of applying a completion to the state.
#[derive(Debug, Clone)]
pub enum TurnOutcome {
    /// The Completion Service answered.
    Reply {
        persona: PersonaId,
        message: Message,
        is_question: bool,
        question_count: u32,
        terminated: bool,
    },
    /// The call failed and the fallback message was appended.
    Fallback { persona: PersonaId, message: Message },
}

impl TurnOutcome {
    pub fn message(&self) -> &Message {
        match self {
            TurnOutcome::Reply { message, .. } | TurnOutcome::Fallback { message, .. } => message,
        }
    }

    pub fn persona(&self) -> &PersonaId {
        match self {
            TurnOutcome::Reply { persona, .. } | TurnOutcome::Fallback { persona, .. } => persona,
        }
    }
}

/// Result of a persona switch.
#[derive(Debug, Clone, PartialEq)]
pub enum SwitchOutcome {
    /// Already active; nothing changed.
    Unchanged,
    /// The persona had history and was resumed as-is.
    Resumed,
    /// The persona had no history and greeted the candidate.
    Greeted(Message),
}

/// The mutable session aggregate.
#[derive(Debug)]
pub struct InterviewState {
    registry: Arc<PersonaRegistry>,
    job_title: String,
    options: SessionOptions,
    active: PersonaId,
    transcripts: TranscriptStore,
    progress: HashMap<PersonaId, PersonaProgress>,
    pending: Option<PersonaId>,
    feedback: HashMap<MessageId, String>,
    audio: HashMap<MessageId, AudioStatus>,
}

impl InterviewState {
    /// Start a session with `persona` active. The persona greets the
    /// candidate with the opening greeting.
    pub fn new(
        registry: Arc<PersonaRegistry>,
        persona: PersonaId,
        job_title: impl Into<String>,
        options: SessionOptions,
    ) -> Result<Self, CoachError> {
        registry.lookup(&persona)?;

        let mut state = Self {
            registry,
            job_title: job_title.into(),
            options,
            active: persona.clone(),
            transcripts: TranscriptStore::new(),
            progress: HashMap::new(),
            pending: None,
            feedback: HashMap::new(),
            audio: HashMap::new(),
        };
        state.greet(&persona, GreetingKind::Opening)?;
        info!(persona = %persona, job_title = %state.job_title, "interview session started");
        Ok(state)
    }

    pub fn phase(&self) -> Phase {
        if self.pending.is_some() {
            Phase::AwaitingResponse
        } else if self.is_terminated(&self.active) {
            Phase::Terminated
        } else {
            Phase::Active
        }
    }

    pub fn active_persona(&self) -> &PersonaId {
        &self.active
    }

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn registry(&self) -> &PersonaRegistry {
        &self.registry
    }

    /// The persona whose completion is outstanding, if any.
    pub fn pending_persona(&self) -> Option<&PersonaId> {
        self.pending.as_ref()
    }

    /// Transcript of the active persona.
    pub fn transcript(&self) -> &[Message] {
        self.transcripts.get(&self.active)
    }

    pub fn transcript_for(&self, persona: &PersonaId) -> &[Message] {
        self.transcripts.get(persona)
    }

    /// Question count of the active persona.
    pub fn question_count(&self) -> u32 {
        self.question_count_for(&self.active)
    }

    pub fn question_count_for(&self, persona: &PersonaId) -> u32 {
        self.progress.get(persona).map_or(0, |p| p.questions)
    }

    /// Summary of the active persona, present once it terminated.
    pub fn evaluation_summary(&self) -> Option<&EvaluationSummary> {
        self.summary_for(&self.active)
    }

    pub fn summary_for(&self, persona: &PersonaId) -> Option<&EvaluationSummary> {
        self.progress.get(persona).and_then(|p| p.summary.as_ref())
    }

    pub fn is_terminated(&self, persona: &PersonaId) -> bool {
        self.question_count_for(persona) >= self.options.max_questions
    }

    pub fn advisory_feedback(&self, message: &MessageId) -> Option<&str> {
        self.feedback.get(message).map(String::as_str)
    }

    pub fn audio_status(&self, message: &MessageId) -> Option<&AudioStatus> {
        self.audio.get(message)
    }

    pub fn set_audio_status(&mut self, message: MessageId, status: AudioStatus) {
        self.audio.insert(message, status);
    }

    /// Store advisory feedback against a candidate message of `persona`.
    ///
    /// Feedback usually lands after the reply. When the persona has
    /// already terminated, its summary is rebuilt to include it. Feedback
    /// for an answer no longer in the transcript (discarded by a reset) is
    /// dropped.
    pub fn record_feedback(&mut self, persona: &PersonaId, answer: MessageId, feedback: String) {
        if !self.transcripts.get(persona).iter().any(|m| m.id == answer) {
            debug!(persona = %persona, answer = %answer, "feedback for a discarded answer dropped");
            return;
        }
        self.feedback.insert(answer, feedback);

        let terminated = self
            .progress
            .get(persona)
            .is_some_and(|p| p.summary.is_some());
        if terminated {
            let summary = self.summarize(persona);
            self.progress.entry(persona.clone()).or_default().summary = Some(summary);
        }
    }

    /// Accept a candidate answer and prepare the completion request.
    ///
    /// The candidate message is appended before any network call.
    pub fn begin_turn(&mut self, text: &str) -> Result<PendingTurn, SessionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyInput);
        }
        if self.pending.is_some() {
            return Err(SessionError::Busy);
        }
        if self.is_terminated(&self.active) {
            return Err(SessionError::Terminated);
        }

        let registry = Arc::clone(&self.registry);
        let persona = self.persona(&registry)?;
        let active = self.active.clone();

        let question = self
            .transcripts
            .get(&active)
            .iter()
            .rev()
            .find(|m| m.role == Role::Interviewer)
            .map(|m| m.text.clone())
            .unwrap_or_default();

        let answer = Message::candidate(text);
        let answer_id = answer.id.clone();
        self.transcripts.append(&active, answer);

        let request = CompletionRequest {
            system_instruction: system_instruction(
                persona,
                &self.job_title,
                self.options.max_questions,
            ),
            messages: self
                .transcripts
                .get(&active)
                .iter()
                .map(ChatMessage::from)
                .collect(),
            job_title: self.job_title.clone(),
        };
        let evaluation = EvaluationRequest {
            answer: text.to_string(),
            question,
            job_title: self.job_title.clone(),
        };

        self.pending = Some(active.clone());
        debug!(
            persona = %active,
            messages = request.messages.len(),
            "completion turn started"
        );

        Ok(PendingTurn {
            ticket: TurnTicket {
                persona: active,
                answer_id,
            },
            request,
            evaluation,
            voice: persona.voice.clone(),
        })
    }

    /// Apply the completion result for `ticket`.
    ///
    /// The reply always lands in the transcript of the persona that issued
    /// the request, even if another persona became active meanwhile.
    pub fn finish_turn(
        &mut self,
        ticket: TurnTicket,
        result: Result<String, CoachError>,
    ) -> TurnOutcome {
        debug_assert_eq!(self.pending.as_ref(), Some(&ticket.persona));
        self.pending = None;
        let persona = ticket.persona;

        let text = match result {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => return self.fallback(persona, "completion returned empty text"),
            Err(err) => return self.fallback(persona, &err.to_string()),
        };

        let text = match self.cue_for(&persona) {
            Some(cue) => format!("{cue} {text}"),
            None => text,
        };
        let is_question = is_question(&text);
        let message = Message::interviewer(text);
        self.transcripts.append(&persona, message.clone());

        let max = self.options.max_questions;
        let progress = self.progress.entry(persona.clone()).or_default();
        if is_question && progress.questions < max {
            progress.questions += 1;
        }
        let question_count = progress.questions;
        let terminated = is_question && question_count >= max;

        if terminated {
            let summary = self.summarize(&persona);
            info!(
                persona = %persona,
                questions = question_count,
                answers = summary.answers_given,
                "question limit reached, interview terminated"
            );
            self.progress.entry(persona.clone()).or_default().summary = Some(summary);
        } else {
            debug!(persona = %persona, question_count, is_question, "reply appended");
        }

        TurnOutcome::Reply {
            persona,
            message,
            is_question,
            question_count,
            terminated,
        }
    }

    /// Make `id` the active persona.
    pub fn switch_persona(&mut self, id: &PersonaId) -> Result<SwitchOutcome, SessionError> {
        if !self.registry.contains(id) {
            return Err(SessionError::UnknownPersona(id.clone()));
        }
        if self.pending.is_some() && !self.options.allow_switch_while_awaiting {
            return Err(SessionError::Busy);
        }
        if *id == self.active {
            return Ok(SwitchOutcome::Unchanged);
        }

        let previous = std::mem::replace(&mut self.active, id.clone());
        info!(from = %previous, to = %id, "switched persona");

        if self.transcripts.len(id) > 0 {
            return Ok(SwitchOutcome::Resumed);
        }
        let message = self
            .greet(id, GreetingKind::Handover)
            .map_err(|_| SessionError::UnknownPersona(id.clone()))?;
        Ok(SwitchOutcome::Greeted(message))
    }

    /// Restart the interview with the active persona.
    ///
    /// Clears the counter and summary. The transcript is dropped and the
    /// opening greeting repeated only when `discard_on_reset` is set.
    pub fn reset(&mut self) -> Result<Option<Message>, SessionError> {
        if self.pending.is_some() {
            return Err(SessionError::Busy);
        }

        let active = self.active.clone();
        self.progress.remove(&active);
        info!(persona = %active, discard = self.options.discard_on_reset, "interview reset");

        if !self.options.discard_on_reset {
            return Ok(None);
        }

        for message in self.transcripts.clear(&active) {
            self.feedback.remove(&message.id);
            self.audio.remove(&message.id);
        }
        let message = self
            .greet(&active, GreetingKind::Opening)
            .map_err(|_| SessionError::UnknownPersona(active.clone()))?;
        Ok(Some(message))
    }

    fn persona<'r>(&self, registry: &'r PersonaRegistry) -> Result<&'r Persona, SessionError> {
        registry
            .lookup(&self.active)
            .map_err(|_| SessionError::UnknownPersona(self.active.clone()))
    }

    fn greet(&mut self, id: &PersonaId, kind: GreetingKind) -> Result<Message, CoachError> {
        let registry = Arc::clone(&self.registry);
        let persona = registry.lookup(id)?;
        let ctx = GreetingContext {
            candidate_name: self.options.candidate_name.as_deref(),
            job_title: &self.job_title,
        };
        let message = Message::interviewer(greeting(persona, kind, &ctx));
        self.transcripts.append(id, message.clone());
        Ok(message)
    }

    fn cue_for(&self, id: &PersonaId) -> Option<String> {
        if !self.options.conversational_cues {
            return None;
        }
        self.registry
            .lookup(id)
            .ok()
            .and_then(|p| p.random_cue().map(str::to_string))
    }

    fn fallback(&mut self, persona: PersonaId, reason: &str) -> TurnOutcome {
        warn!(persona = %persona, reason, "completion failed, appending fallback message");
        let message = Message::interviewer(self.options.fallback_message.clone());
        self.transcripts.append(&persona, message.clone());
        TurnOutcome::Fallback { persona, message }
    }

    fn summarize(&self, persona: &PersonaId) -> EvaluationSummary {
        let answers: Vec<&Message> = self
            .transcripts
            .get(persona)
            .iter()
            .filter(|m| m.role == Role::Candidate)
            .collect();
        let feedback = answers
            .iter()
            .map(|m| self.advisory_feedback(&m.id).unwrap_or(""));
        EvaluationSummary::from_feedback(feedback, self.question_count_for(persona), answers.len())
    }
}
