// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identity and health shared by every external service adapter.

use async_trait::async_trait;

use crate::error::CoachError;
use crate::types::HealthStatus;

/// Supertrait of the completion, evaluation and speech adapters.
///
/// `coach doctor` reports adapters through this trait alone.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Short name used in logs and diagnostics, e.g. `typhoon`.
    fn name(&self) -> &str;

    /// Report whether the adapter can serve requests.
    async fn health_check(&self) -> Result<HealthStatus, CoachError>;
}
