// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Coach interview engine.

use thiserror::Error;

/// The primary error type used across all Coach adapter traits and core operations.
#[derive(Debug, Error)]
pub enum CoachError {
    /// Configuration errors (invalid TOML, missing credentials, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// External service errors (network failure, non-success status, malformed payload).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A persona identifier that is not in the registry.
    ///
    /// Callers only offer registered personas, so this is a contract violation
    /// rather than a user-facing condition.
    #[error("persona not found: {id}")]
    PersonaNotFound { id: String },

    /// An external call did not finish within its deadline.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CoachError {
    /// Shorthand for a provider error without an underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        CoachError::Provider {
            message: message.into(),
            source: None,
        }
    }
}
