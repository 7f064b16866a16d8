// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Readable reports for a bad `coach.toml`.
//!
//! Deserialization failures point at the offending line of the file that
//! produced them, and a misspelled key gets the closest valid name.

#![allow(unused_assignments)] // emitted by the miette Diagnostic derive

use figment::error::Kind;
use miette::{Diagnostic, GraphicalReportHandler, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler score a valid key must beat to be offered as a fix.
const SUGGESTION_THRESHOLD: f64 = 0.75;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(coach::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        /// Keys accepted by the enclosing table, comma separated.
        valid_keys: String,
        #[label("not a coach setting")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(coach::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        /// Dotted path, e.g. `session.max_questions`.
        key: String,
        detail: String,
        expected: String,
    },

    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(coach::config::missing_key),
        help("add `{key} = <value>` to your coach.toml")
    )]
    MissingKey { key: String },

    /// Raised by `validate_config` after a successful parse.
    #[error("validation error: {message}")]
    #[diagnostic(code(coach::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(coach::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Split a figment failure into one [`ConfigError`] per problem.
///
/// `toml_sources` pairs each loaded file path with its contents so unknown
/// keys can be underlined in place.
pub fn from_figment(err: figment::Error, toml_sources: &[(String, String)]) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, expected) => {
                let (span, src) = locate(&error, field, toml_sources).unzip();
                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion: suggest_key(field, *expected),
                    valid_keys: expected.join(", "),
                    span,
                    src,
                }
            }
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: field.to_string(),
            },
            Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                key: error.path.join("."),
                detail: format!("found {actual}, expected {expected}"),
                expected: expected.clone(),
            },
            _ => ConfigError::Other(error.to_string()),
        })
        .collect()
}

fn locate(
    error: &figment::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> Option<(SourceSpan, NamedSource<String>)> {
    let figment::Source::File(path) = error.metadata.as_ref()?.source.as_ref()? else {
        return None;
    };
    let path = path.display().to_string();
    let (_, content) = toml_sources.iter().find(|(p, _)| *p == path)?;
    let offset = find_key_offset(content, &error.path, field)?;
    Some((
        SourceSpan::new(offset.into(), field.len()),
        NamedSource::new(path, content.clone()),
    ))
}

/// Byte offset of the line defining `field`, looking only below the
/// `[table]` header named by `path[0]`. Top-level keys search the whole file.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let start = match path.first() {
        Some(table) => {
            let header = format!("[{table}]");
            content.find(&header)? + header.len()
        }
        None => 0,
    };

    let mut offset = start;
    for line in content[start..].split_inclusive('\n') {
        let key = line.trim_start();
        let defines_field = key
            .strip_prefix(field)
            .is_some_and(|rest| rest.starts_with([' ', '\t', '=']));
        if defines_field {
            return Some(offset + line.len() - key.len());
        }
        offset += line.len();
    }
    None
}

/// The valid key closest to `unknown`, when it is close enough.
pub fn suggest_key<S: AsRef<str>>(unknown: &str, valid_keys: &[S]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| {
            let key: &str = key.as_ref();
            (strsim::jaro_winkler(unknown, key), key)
        })
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_owned())
}

/// Print every error to stderr, falling back to the plain message when the
/// graphical report cannot be rendered.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut report = String::new();
        match handler.render_report(&mut report, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{report}"),
            Err(_) => eprintln!("Error: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_max_question_for_max_questions() {
        let valid = ["log_level", "max_questions", "discard_on_reset"];
        assert_eq!(
            suggest_key("max_question", &valid),
            Some("max_questions".to_string())
        );
    }

    #[test]
    fn suggest_api_kye_for_api_key() {
        let valid = ["api_key", "base_url", "model"];
        assert_eq!(suggest_key("api_kye", &valid), Some("api_key".to_string()));
    }

    #[test]
    fn no_suggestion_for_distant_typo() {
        let valid = ["log_level", "max_questions"];
        assert_eq!(suggest_key("zzzzzz", &valid), None);
    }

    #[test]
    fn find_key_offset_in_section() {
        let content = "[session]\nmax_qestions = 3\n";
        let path = vec!["session".to_string()];
        let o = find_key_offset(content, &path, "max_qestions").unwrap();
        assert_eq!(&content[o..o + 12], "max_qestions");
    }

    #[test]
    fn find_key_offset_skips_prefix_matches() {
        let content = "[speech]\nenabled_voice = 1\n  enabled = true\n";
        let path = vec!["speech".to_string()];
        let o = find_key_offset(content, &path, "enabled").unwrap();
        assert_eq!(&content[o..], "enabled = true\n");
    }

    #[test]
    fn find_key_offset_missing_section() {
        let content = "[speech]\nenabled = true\n";
        let path = vec!["session".to_string()];
        assert_eq!(find_key_offset(content, &path, "enabled"), None);
    }
}
