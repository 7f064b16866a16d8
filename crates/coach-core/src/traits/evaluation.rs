// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Evaluation adapter trait for advisory answer feedback.

use async_trait::async_trait;

use crate::error::CoachError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{EvaluationRequest, EvaluationResponse};

/// Adapter for the Evaluation Service.
///
/// Feedback is advisory: the session swallows failures and substitutes an
/// empty string.
#[async_trait]
pub trait EvaluationAdapter: PluginAdapter {
    /// Evaluates one candidate answer against the question it responded to.
    async fn evaluate(&self, request: EvaluationRequest)
        -> Result<EvaluationResponse, CoachError>;
}
