// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock Completion Service adapter for deterministic testing.
//!
//! `MockCompletion` pops scripted replies from a FIFO queue and records every
//! request it receives. When the queue is empty it answers with
//! [`DEFAULT_REPLY`], which is not a question.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use coach_core::types::{CompletionRequest, CompletionResponse};
use coach_core::{CoachError, CompletionAdapter, HealthStatus, PluginAdapter};

/// Reply used once the script runs out.
pub const DEFAULT_REPLY: &str = "mock response";

/// One scripted behavior.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Succeed with this text.
    Reply(String),
    /// Fail with a provider error carrying this message.
    Fail(String),
    /// Never answer. Used to exercise timeouts.
    Hang,
}

/// A mock Completion Service.
pub struct MockCompletion {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
    gate: Option<Arc<Notify>>,
}

impl MockCompletion {
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            gate: None,
        }
    }

    /// Pre-load successful replies.
    pub fn with_replies(replies: Vec<String>) -> Self {
        Self::with_script(replies.into_iter().map(Scripted::Reply).collect())
    }

    pub fn with_script(script: Vec<Scripted>) -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::from(script))),
            ..Self::new()
        }
    }

    /// Hold every call until `gate` is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub async fn push(&self, step: Scripted) {
        self.script.lock().await.push_back(step);
    }

    pub async fn push_reply(&self, text: impl Into<String>) {
        self.push(Scripted::Reply(text.into())).await;
    }

    pub async fn push_failure(&self, message: impl Into<String>) {
        self.push(Scripted::Fail(message.into())).await;
    }

    /// Number of `complete` calls received so far.
    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    /// Every request received, in order.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }
}

impl Default for MockCompletion {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockCompletion {
    fn name(&self) -> &str {
        "mock-completion"
    }

    async fn health_check(&self) -> Result<HealthStatus, CoachError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl CompletionAdapter for MockCompletion {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, CoachError> {
        self.requests.lock().await.push(request);
        let step = self.script.lock().await.pop_front();

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match step.unwrap_or_else(|| Scripted::Reply(DEFAULT_REPLY.to_string())) {
            Scripted::Reply(text) => Ok(CompletionResponse {
                text,
                model: "mock-model".to_string(),
                usage: None,
            }),
            Scripted::Fail(message) => Err(CoachError::provider(message)),
            Scripted::Hang => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CompletionRequest {
        CompletionRequest {
            system_instruction: "sys".into(),
            messages: vec![],
            job_title: "QA".into(),
        }
    }

    #[tokio::test]
    async fn replays_script_then_default() {
        let mock = MockCompletion::with_script(vec![
            Scripted::Reply("first?".into()),
            Scripted::Fail("boom".into()),
        ]);
        assert_eq!(mock.complete(request()).await.unwrap().text, "first?");
        assert!(mock.complete(request()).await.is_err());
        assert_eq!(mock.complete(request()).await.unwrap().text, DEFAULT_REPLY);
        assert_eq!(mock.call_count().await, 3);
    }
}
