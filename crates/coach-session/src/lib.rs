// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation session for the Coach interview engine.
//!
//! - [`transcript`]: per-persona append-only message history
//! - [`classifier`]: the question heuristic behind the counter
//! - [`rubric`]: evaluation summary computed at termination
//! - [`machine`]: the synchronous state machine
//! - [`session`]: the async driver that calls the external services

pub mod classifier;
pub mod error;
pub mod machine;
pub mod rubric;
pub mod session;
pub mod transcript;

pub use classifier::is_question;
pub use error::SessionError;
pub use machine::{
    AudioStatus, InterviewState, PendingTurn, Phase, SessionOptions, SwitchOutcome, TurnOutcome,
    TurnTicket,
};
pub use rubric::{CategoryScore, EvaluationSummary};
pub use session::{ConversationSession, Submitted, DEFAULT_REQUEST_TIMEOUT};
pub use transcript::TranscriptStore;
