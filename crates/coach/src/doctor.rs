// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `coach doctor` command implementation.
//!
//! Builds every enabled adapter from configuration and runs its health
//! check. Construction is where missing credentials surface, so a failed
//! build is reported as a failed check.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use coach_config::CoachConfig;
use coach_core::{CoachError, HealthStatus, PluginAdapter};
use coach_gemini::GeminiEvaluator;
use coach_speech::SpeechSynthesizer;
use coach_typhoon::TyphoonProvider;
use colored::Colorize;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

/// Run the `coach doctor` command.
pub async fn run_doctor(config: &CoachConfig, plain: bool) -> Result<(), CoachError> {
    let use_color = !plain && std::io::stdout().is_terminal();
    let results = run_checks(config).await;

    println!();
    println!("  coach doctor");
    println!("  {}", "-".repeat(50));

    let mut issues = 0;
    for result in &results {
        if result.status != CheckStatus::Pass {
            issues += 1;
        }
        println!("{}", render_line(result, use_color));
    }

    println!();
    match issues {
        0 => println!("  All checks passed."),
        1 => println!("  1 issue found."),
        n => println!("  {n} issues found."),
    }
    println!();

    Ok(())
}

/// Run one check per external service.
pub async fn run_checks(config: &CoachConfig) -> Vec<CheckResult> {
    let mut results = Vec::with_capacity(3);

    let start = Instant::now();
    results.push(match TyphoonProvider::new(&config.completion) {
        Ok(adapter) => check_adapter("Completion", &adapter, start).await,
        Err(e) => failed("Completion", &e, start),
    });

    let start = Instant::now();
    results.push(if !config.evaluation.enabled {
        disabled("Evaluation", start)
    } else {
        match GeminiEvaluator::new(&config.evaluation) {
            Ok(adapter) => check_adapter("Evaluation", &adapter, start).await,
            Err(e) => failed("Evaluation", &e, start),
        }
    });

    let start = Instant::now();
    results.push(if !config.speech.enabled {
        disabled("Speech", start)
    } else {
        match SpeechSynthesizer::new(&config.speech) {
            Ok(adapter) => check_adapter("Speech", &adapter, start).await,
            Err(e) => failed("Speech", &e, start),
        }
    });

    results
}

async fn check_adapter(name: &str, adapter: &dyn PluginAdapter, start: Instant) -> CheckResult {
    let (status, message) = match adapter.health_check().await {
        Ok(HealthStatus::Healthy) => (CheckStatus::Pass, format!("{} ready", adapter.name())),
        Ok(HealthStatus::Degraded(reason)) => (CheckStatus::Warn, reason),
        Ok(HealthStatus::Unhealthy(reason)) => (CheckStatus::Fail, reason),
        Err(e) => (CheckStatus::Fail, e.to_string()),
    };
    CheckResult {
        name: name.to_string(),
        status,
        message,
        duration: start.elapsed(),
    }
}

fn failed(name: &str, error: &CoachError, start: Instant) -> CheckResult {
    CheckResult {
        name: name.to_string(),
        status: CheckStatus::Fail,
        message: error.to_string(),
        duration: start.elapsed(),
    }
}

fn disabled(name: &str, start: Instant) -> CheckResult {
    CheckResult {
        name: name.to_string(),
        status: CheckStatus::Warn,
        message: "disabled in configuration".to_string(),
        duration: start.elapsed(),
    }
}

fn render_line(result: &CheckResult, use_color: bool) -> String {
    let duration_ms = result.duration.as_millis();
    if use_color {
        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green(), result.message.normal()),
            CheckStatus::Warn => ("!".yellow(), result.message.yellow()),
            CheckStatus::Fail => ("✗".red(), result.message.red()),
        };
        format!("    {symbol} {:<12} {message} ({duration_ms}ms)", result.name)
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!(
            "    {tag} {:<12} {} ({duration_ms}ms)",
            result.name, result.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        // SAFETY: test-only env mutation, serialized with #[serial].
        unsafe {
            std::env::remove_var(coach_typhoon::API_KEY_ENV);
            std::env::remove_var(coach_gemini::API_KEY_ENV);
            std::env::remove_var(coach_speech::API_TOKEN_ENV);
        }
    }

    #[tokio::test]
    #[serial]
    async fn missing_completion_key_fails() {
        clear_env();
        let results = run_checks(&CoachConfig::default()).await;
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].name, "Completion");
        assert_eq!(results[0].status, CheckStatus::Fail);
        assert!(results[0].message.contains("TYPHOON_API_KEY"));
    }

    #[tokio::test]
    #[serial]
    async fn disabled_services_warn() {
        clear_env();
        let mut config = CoachConfig::default();
        config.completion.api_key = Some("sk-test".to_string());
        let results = run_checks(&config).await;
        assert_eq!(results[0].status, CheckStatus::Pass);
        assert_eq!(results[1].status, CheckStatus::Warn);
        assert_eq!(results[2].status, CheckStatus::Warn);
        assert_eq!(results[2].message, "disabled in configuration");
    }

    #[tokio::test]
    #[serial]
    async fn enabled_service_without_credentials_fails() {
        clear_env();
        let mut config = CoachConfig::default();
        config.completion.api_key = Some("sk-test".to_string());
        config.evaluation.enabled = true;
        config.speech.enabled = true;
        config.speech.api_token = Some("tts-token".to_string());
        let results = run_checks(&config).await;
        assert_eq!(results[1].status, CheckStatus::Fail);
        assert_eq!(results[2].status, CheckStatus::Pass);
    }

    #[test]
    fn plain_lines_are_tagged() {
        let result = CheckResult {
            name: "Speech".to_string(),
            status: CheckStatus::Warn,
            message: "disabled in configuration".to_string(),
            duration: Duration::from_millis(3),
        };
        assert_eq!(
            render_line(&result, false),
            "    [WARN] Speech       disabled in configuration (3ms)"
        );
    }
}
