// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Async driver connecting the state machine to the external services.
//!
//! The state lock is held only between awaits: a submission locks to begin
//! the turn, releases it for the network round trip, and locks again to
//! apply the result. A concurrent caller therefore sees
//! `awaiting-response` and is rejected with [`SessionError::Busy`].
//!
//! Each turn runs on its own task that owns the [`TurnTicket`], so the
//! session leaves `awaiting-response` even when the caller stops polling
//! `submit`. Advisory evaluation and speech run on background tasks and
//! never delay the reply.

use std::sync::Arc;
use std::time::Duration;

use coach_core::types::{CompletionRequest, EvaluationRequest, SpeechRequest};
use coach_core::{
    CoachError, CompletionAdapter, EvaluationAdapter, Message, MessageId, PersonaId, SpeechAdapter,
};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn, Instrument};

use crate::error::SessionError;
use crate::machine::{
    AudioStatus, InterviewState, PendingTurn, Phase, SwitchOutcome, TurnOutcome, TurnTicket,
};
use crate::rubric::EvaluationSummary;

/// Default bound on every external call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// What a successful `submit` produced.
#[derive(Debug)]
pub struct Submitted {
    pub outcome: TurnOutcome,
    /// The candidate message this turn answered.
    pub answer_id: MessageId,
    /// Background advisory evaluation of the answer, when enabled. The
    /// feedback is readable through `advisory_feedback(answer_id)` once it
    /// finishes.
    pub evaluation: Option<JoinHandle<()>>,
    /// Background speech synthesis for the reply, if any was started.
    pub speech: Option<JoinHandle<()>>,
}

/// A live interview session.
pub struct ConversationSession {
    state: Arc<Mutex<InterviewState>>,
    completion: Arc<dyn CompletionAdapter>,
    evaluation: Option<Arc<dyn EvaluationAdapter>>,
    speech: Option<Arc<dyn SpeechAdapter>>,
    timeout: Duration,
}

/// What the turn task needs after `submit` hands it off.
struct TurnDriver {
    state: Arc<Mutex<InterviewState>>,
    completion: Arc<dyn CompletionAdapter>,
    speech: Option<Arc<dyn SpeechAdapter>>,
    timeout: Duration,
}

impl ConversationSession {
    pub fn new(state: InterviewState, completion: Arc<dyn CompletionAdapter>) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            completion,
            evaluation: None,
            speech: None,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_evaluation(mut self, evaluation: Arc<dyn EvaluationAdapter>) -> Self {
        self.evaluation = Some(evaluation);
        self
    }

    pub fn with_speech(mut self, speech: Arc<dyn SpeechAdapter>) -> Self {
        self.speech = Some(speech);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Submit a candidate answer and wait for the interviewer's reply.
    ///
    /// Completion failures never surface here: they produce a
    /// [`TurnOutcome::Fallback`]. Only boundary rejections are errors.
    /// Dropping the returned future does not abandon the turn.
    pub async fn submit(&self, text: &str) -> Result<Submitted, SessionError> {
        let PendingTurn {
            ticket,
            request,
            evaluation,
            voice,
        } = self.state.lock().await.begin_turn(text)?;
        let answer_id = ticket.answer_id().clone();

        let evaluation = self.evaluation.as_ref().map(|evaluator| {
            spawn_evaluation(
                Arc::clone(&self.state),
                Arc::clone(evaluator),
                self.timeout,
                ticket.persona().clone(),
                answer_id.clone(),
                evaluation,
            )
        });

        let driver = TurnDriver {
            state: Arc::clone(&self.state),
            completion: Arc::clone(&self.completion),
            speech: self.speech.clone(),
            timeout: self.timeout,
        };
        let turn = tokio::spawn(driver.run(ticket, request, voice).in_current_span());
        let (outcome, speech) = turn.await.map_err(|err| {
            warn!(error = %err, "turn task ended without a reply");
            SessionError::Interrupted
        })?;

        Ok(Submitted {
            outcome,
            answer_id,
            evaluation,
            speech,
        })
    }

    pub async fn switch_persona(&self, id: &PersonaId) -> Result<SwitchOutcome, SessionError> {
        self.state.lock().await.switch_persona(id)
    }

    pub async fn reset(&self) -> Result<Option<Message>, SessionError> {
        self.state.lock().await.reset()
    }

    pub async fn phase(&self) -> Phase {
        self.state.lock().await.phase()
    }

    pub async fn active_persona(&self) -> PersonaId {
        self.state.lock().await.active_persona().clone()
    }

    /// Snapshot of the active persona's transcript.
    pub async fn transcript(&self) -> Vec<Message> {
        self.state.lock().await.transcript().to_vec()
    }

    pub async fn transcript_for(&self, persona: &PersonaId) -> Vec<Message> {
        self.state.lock().await.transcript_for(persona).to_vec()
    }

    pub async fn question_count(&self) -> u32 {
        self.state.lock().await.question_count()
    }

    pub async fn evaluation_summary(&self) -> Option<EvaluationSummary> {
        self.state.lock().await.evaluation_summary().cloned()
    }

    pub async fn audio_status(&self, message: &MessageId) -> Option<AudioStatus> {
        self.state.lock().await.audio_status(message).cloned()
    }

    pub async fn advisory_feedback(&self, message: &MessageId) -> Option<String> {
        self.state
            .lock()
            .await
            .advisory_feedback(message)
            .map(str::to_string)
    }

    /// Run `f` against the current state under the lock.
    pub async fn inspect<R>(&self, f: impl FnOnce(&InterviewState) -> R) -> R {
        f(&*self.state.lock().await)
    }
}

impl TurnDriver {
    /// Call the Completion Service and apply the result. Always ends the
    /// turn, with a reply or with the fallback message.
    async fn run(
        self,
        ticket: TurnTicket,
        request: CompletionRequest,
        voice: String,
    ) -> (TurnOutcome, Option<JoinHandle<()>>) {
        let completion = Arc::clone(&self.completion);
        let mut call =
            tokio::spawn(async move { completion.complete(request).await }.in_current_span());

        let result = match tokio::time::timeout(self.timeout, &mut call).await {
            Ok(Ok(result)) => result.map(|response| response.text),
            Ok(Err(err)) => Err(CoachError::Internal(format!("completion task failed: {err}"))),
            Err(_) => {
                call.abort();
                Err(CoachError::Timeout {
                    duration: self.timeout,
                })
            }
        };

        let outcome = {
            let mut state = self.state.lock().await;
            let outcome = state.finish_turn(ticket, result);
            if matches!(outcome, TurnOutcome::Reply { .. }) && self.speech.is_some() {
                state.set_audio_status(outcome.message().id.clone(), AudioStatus::Pending);
            }
            outcome
        };

        let speech = match (&outcome, self.speech) {
            (TurnOutcome::Reply { message, .. }, Some(speech)) => Some(spawn_speech(
                self.state,
                speech,
                self.timeout,
                message,
                voice,
            )),
            _ => None,
        };
        (outcome, speech)
    }
}

/// Grade `answer` in the background and record the feedback, or an empty
/// string when the Evaluation Service fails.
fn spawn_evaluation(
    state: Arc<Mutex<InterviewState>>,
    evaluator: Arc<dyn EvaluationAdapter>,
    timeout: Duration,
    persona: PersonaId,
    answer: MessageId,
    request: EvaluationRequest,
) -> JoinHandle<()> {
    tokio::spawn(
        async move {
            let feedback = match tokio::time::timeout(timeout, evaluator.evaluate(request)).await {
                Ok(Ok(response)) => response.feedback,
                Ok(Err(err)) => {
                    warn!(answer = %answer, error = %err, "advisory evaluation failed");
                    String::new()
                }
                Err(_) => {
                    warn!(answer = %answer, timeout = ?timeout, "advisory evaluation timed out");
                    String::new()
                }
            };
            state.lock().await.record_feedback(&persona, answer, feedback);
        }
        .in_current_span(),
    )
}

fn spawn_speech(
    state: Arc<Mutex<InterviewState>>,
    speech: Arc<dyn SpeechAdapter>,
    timeout: Duration,
    message: &Message,
    voice: String,
) -> JoinHandle<()> {
    let id = message.id.clone();
    let request = SpeechRequest {
        text: message.text.clone(),
        voice,
    };

    tokio::spawn(
        async move {
            let status = match tokio::time::timeout(timeout, speech.synthesize(request)).await {
                Ok(Ok(response)) => {
                    debug!(message_id = %id, "speech ready");
                    AudioStatus::Ready(response.audio_url)
                }
                Ok(Err(err)) => {
                    warn!(message_id = %id, error = %err, "speech synthesis failed");
                    AudioStatus::Unavailable
                }
                Err(_) => {
                    warn!(message_id = %id, timeout = ?timeout, "speech synthesis timed out");
                    AudioStatus::Unavailable
                }
            };
            state.lock().await.set_audio_status(id, status);
        }
        .in_current_span(),
    )
}
