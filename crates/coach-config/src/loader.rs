// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./coach.toml` > `~/.config/coach/coach.toml` > `/etc/coach/coach.toml`
//! with environment variable overrides via `COACH_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::CoachConfig;

/// Sections that environment variables may address.
const ENV_SECTIONS: &[&str] = &["session", "completion", "evaluation", "speech"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/coach/coach.toml` (system-wide)
/// 3. `~/.config/coach/coach.toml` (user XDG config)
/// 4. `./coach.toml` (local directory)
/// 5. `COACH_*` environment variables
pub fn load_config() -> Result<CoachConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<CoachConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CoachConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CoachConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CoachConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(CoachConfig::default()))
        .merge(Toml::file("/etc/coach/coach.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("coach/coach.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("coach.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider with explicit section-to-dot mapping.
///
/// `Env::split("_")` would turn `COACH_SESSION_MAX_QUESTIONS` into
/// `session.max.questions`; only the first segment names the section.
fn env_provider() -> Env {
    Env::prefixed("COACH_").map(|key| map_env_key(key.as_str()).into())
}

/// Maps a lowercased, prefix-stripped env key to its dotted config path.
fn map_env_key(key: &str) -> String {
    for section in ENV_SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(map_env_key("session_max_questions"), "session.max_questions");
        assert_eq!(map_env_key("completion_api_key"), "completion.api_key");
        assert_eq!(map_env_key("speech_api_token"), "speech.api_token");
        assert_eq!(map_env_key("evaluation_enabled"), "evaluation.enabled");
    }

    #[test]
    fn unknown_env_sections_pass_through() {
        assert_eq!(map_env_key("personas"), "personas");
        assert_eq!(map_env_key("sessionless"), "sessionless");
    }

    #[test]
    fn env_overrides_file_values() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("coach.toml", "[session]\nmax_questions = 5\n")?;
            jail.set_env("COACH_SESSION_MAX_QUESTIONS", "7");
            jail.set_env("COACH_COMPLETION_MODEL", "typhoon-test");

            let config = load_config_from_path(Path::new("coach.toml"))?;
            assert_eq!(config.session.max_questions, 7);
            assert_eq!(config.completion.model, "typhoon-test");
            Ok(())
        });
    }
}
