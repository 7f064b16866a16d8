// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock Evaluation Service adapter.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use coach_core::types::{EvaluationRequest, EvaluationResponse};
use coach_core::{CoachError, EvaluationAdapter, HealthStatus, PluginAdapter};

enum Behavior {
    Feedback(String),
    Fail,
    Hang,
}

/// Returns the same feedback for every answer, always fails, or never
/// answers.
pub struct MockEvaluator {
    behavior: Behavior,
    requests: Arc<Mutex<Vec<EvaluationRequest>>>,
}

impl MockEvaluator {
    fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_feedback(feedback: impl Into<String>) -> Self {
        Self::new(Behavior::Feedback(feedback.into()))
    }

    pub fn failing() -> Self {
        Self::new(Behavior::Fail)
    }

    /// Never returns; the caller's timeout decides the outcome.
    pub fn hanging() -> Self {
        Self::new(Behavior::Hang)
    }

    pub async fn requests(&self) -> Vec<EvaluationRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl PluginAdapter for MockEvaluator {
    fn name(&self) -> &str {
        "mock-evaluator"
    }

    async fn health_check(&self) -> Result<HealthStatus, CoachError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl EvaluationAdapter for MockEvaluator {
    async fn evaluate(&self, request: EvaluationRequest) -> Result<EvaluationResponse, CoachError> {
        self.requests.lock().await.push(request);
        match &self.behavior {
            Behavior::Feedback(feedback) => Ok(EvaluationResponse {
                feedback: feedback.clone(),
            }),
            Behavior::Fail => Err(CoachError::provider("mock evaluation failure")),
            Behavior::Hang => std::future::pending().await,
        }
    }
}
