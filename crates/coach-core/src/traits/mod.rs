// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the external collaborators.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod completion;
pub mod evaluation;
pub mod speech;

pub use adapter::PluginAdapter;
pub use completion::CompletionAdapter;
pub use evaluation::EvaluationAdapter;
pub use speech::SpeechAdapter;
