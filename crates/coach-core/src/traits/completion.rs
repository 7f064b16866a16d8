// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion adapter trait for chat-completion endpoints.

use async_trait::async_trait;

use crate::error::CoachError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CompletionRequest, CompletionResponse};

/// Adapter for the Completion Service that produces the next interviewer utterance.
///
/// Implementations validate the remote payload: an `Ok` response always
/// carries non-empty text.
#[async_trait]
pub trait CompletionAdapter: PluginAdapter {
    /// Sends the transcript and system instruction, returning the next utterance.
    async fn complete(&self, request: CompletionRequest)
        -> Result<CompletionResponse, CoachError>;
}
