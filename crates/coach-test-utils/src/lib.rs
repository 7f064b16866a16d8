// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Coach: mock adapters and a session harness.
//!
//! No network access is needed by anything in this crate.

pub mod harness;
pub mod mock_completion;
pub mod mock_evaluator;
pub mod mock_speech;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_completion::{MockCompletion, Scripted, DEFAULT_REPLY};
pub use mock_evaluator::MockEvaluator;
pub use mock_speech::MockSpeech;
