// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as positive limits, sampling ranges, and unique persona identifiers.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::CoachConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &CoachConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.session.max_questions == 0 {
        errors.push(ConfigError::Validation {
            message: "session.max_questions must be at least 1".to_string(),
        });
    }

    if config.session.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "session.request_timeout_secs must be at least 1".to_string(),
        });
    }

    if config.session.fallback_message.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "session.fallback_message must not be empty".to_string(),
        });
    }

    for (key, url) in [
        ("completion.base_url", &config.completion.base_url),
        ("evaluation.base_url", &config.evaluation.base_url),
        ("speech.base_url", &config.speech.base_url),
    ] {
        let url = url.trim();
        if url.is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{key} must not be empty"),
            });
        } else if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(ConfigError::Validation {
                message: format!("{key} `{url}` must start with http:// or https://"),
            });
        }
    }

    if config.completion.model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "completion.model must not be empty".to_string(),
        });
    }

    if !(0.0..=2.0).contains(&config.completion.temperature) {
        errors.push(ConfigError::Validation {
            message: format!(
                "completion.temperature must be between 0.0 and 2.0, got {}",
                config.completion.temperature
            ),
        });
    }

    if !(0.0..=1.0).contains(&config.completion.top_p) {
        errors.push(ConfigError::Validation {
            message: format!(
                "completion.top_p must be between 0.0 and 1.0, got {}",
                config.completion.top_p
            ),
        });
    }

    if config.completion.max_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "completion.max_tokens must be at least 1".to_string(),
        });
    }

    if !(0.1..=10.0).contains(&config.speech.speed) {
        errors.push(ConfigError::Validation {
            message: format!(
                "speech.speed must be between 0.1 and 10.0, got {}",
                config.speech.speed
            ),
        });
    }

    // Validate persona identifiers: non-empty and unique.
    let mut seen_ids = HashSet::new();
    for (i, persona) in config.personas.iter().enumerate() {
        if persona.id.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("personas[{i}].id must not be empty"),
            });
            continue;
        }
        if !seen_ids.insert(persona.id.as_str()) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate persona id `{}` in [[personas]] array", persona.id),
            });
        }
        if persona.name.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("personas[{i}].name must not be empty"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PersonaConfig;
    use coach_core::GenderTag;

    fn persona(id: &str) -> PersonaConfig {
        PersonaConfig {
            id: id.to_string(),
            name: "Ms. Test".to_string(),
            title: "Recruiter".to_string(),
            company: "Acme".to_string(),
            gender: GenderTag::Feminine,
            style: "calm".to_string(),
            voice: "voice-1".to_string(),
            traits: vec![],
            follow_up_style: String::new(),
            conversational_cues: vec![],
        }
    }

    #[test]
    fn default_config_validates() {
        let config = CoachConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn zero_max_questions_fails_validation() {
        let mut config = CoachConfig::default();
        config.session.max_questions = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("max_questions"))));
    }

    #[test]
    fn non_http_url_fails_validation() {
        let mut config = CoachConfig::default();
        config.completion.base_url = "ftp://example.com".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("completion.base_url"))));
    }

    #[test]
    fn temperature_out_of_range_fails_validation() {
        let mut config = CoachConfig::default();
        config.completion.temperature = 3.5;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn duplicate_persona_ids_fail_validation() {
        let mut config = CoachConfig::default();
        config.personas = vec![persona("4"), persona("4")];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("duplicate persona id `4`"))));
    }

    #[test]
    fn multiple_errors_are_collected() {
        let mut config = CoachConfig::default();
        config.session.max_questions = 0;
        config.session.request_timeout_secs = 0;
        config.personas = vec![persona(" ")];
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
