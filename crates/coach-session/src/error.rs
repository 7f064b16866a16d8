// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use coach_core::PersonaId;
use thiserror::Error;

/// Rejections at the session boundary.
///
/// Apart from `Interrupted`, none of these change session state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The submission was empty after trimming.
    #[error("message is empty")]
    EmptyInput,

    /// A completion request is still outstanding.
    #[error("waiting for the interviewer to respond")]
    Busy,

    /// The active persona has asked its maximum number of questions.
    #[error("interview with this persona has finished")]
    Terminated,

    /// The turn's driver task died before a reply was applied.
    #[error("the interviewer's reply was interrupted")]
    Interrupted,

    /// The persona is not registered.
    #[error("unknown persona: {0}")]
    UnknownPersona(PersonaId),
}
