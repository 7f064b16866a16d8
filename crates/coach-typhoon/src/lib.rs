// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion Service adapter for OpenAI-compatible chat completions.
//!
//! Defaults target OpenTyphoon. Any endpoint speaking the same
//! `chat/completions` dialect works by changing `completion.base_url`.

pub mod client;
pub mod types;

use async_trait::async_trait;
use coach_config::model::CompletionConfig;
use coach_core::traits::{CompletionAdapter, PluginAdapter};
use coach_core::types::{
    ChatRole, CompletionRequest, CompletionResponse, HealthStatus, TokenUsage,
};
use coach_core::CoachError;
use secrecy::SecretString;
use tracing::{debug, info};

use crate::client::TyphoonClient;
use crate::types::{ApiMessage, ChatCompletionRequest, ChatCompletionResponse};

/// Environment variable consulted when `completion.api_key` is unset.
pub const API_KEY_ENV: &str = "TYPHOON_API_KEY";

/// Chat completion provider implementing [`CompletionAdapter`].
///
/// API key resolution order: config -> `TYPHOON_API_KEY` env var -> error.
pub struct TyphoonProvider {
    client: TyphoonClient,
    model: String,
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
    repetition_penalty: Option<f64>,
}

impl TyphoonProvider {
    pub fn new(config: &CompletionConfig) -> Result<Self, CoachError> {
        let api_key = resolve_api_key(config.api_key.as_deref())?;
        let client = TyphoonClient::new(&api_key, config.base_url.clone())?;

        info!(model = %config.model, url = %config.base_url, "completion provider initialized");

        Ok(Self {
            client,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
            repetition_penalty: config.repetition_penalty,
        })
    }

    fn to_api_request(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        messages.push(ApiMessage {
            role: ChatRole::System.to_string(),
            content: request.system_instruction.clone(),
        });
        messages.extend(request.messages.iter().map(|m| ApiMessage {
            role: m.role.to_string(),
            content: m.content.clone(),
        }));

        ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
            repetition_penalty: self.repetition_penalty,
            stream: false,
        }
    }
}

/// Validate a response into the reply text; `choices[0].message.content`
/// must be present and non-blank.
pub fn extract_reply(response: ChatCompletionResponse) -> Result<CompletionResponse, CoachError> {
    let usage = response.usage.map(|u| TokenUsage {
        prompt_tokens: u.prompt_tokens,
        completion_tokens: u.completion_tokens,
    });
    let text = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| {
            CoachError::provider("completion response has no choices[0].message.content")
        })?;

    Ok(CompletionResponse {
        text,
        model: response.model.unwrap_or_default(),
        usage,
    })
}

#[async_trait]
impl PluginAdapter for TyphoonProvider {
    fn name(&self) -> &str {
        "typhoon"
    }

    async fn health_check(&self) -> Result<HealthStatus, CoachError> {
        // Credentials and client are checked at construction; a live call
        // would spend tokens.
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl CompletionAdapter for TyphoonProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, CoachError> {
        let api_request = self.to_api_request(&request);
        let response = self.client.complete(&api_request).await?;
        let reply = extract_reply(response)?;
        debug!(
            model = %reply.model,
            chars = reply.text.chars().count(),
            "completion received"
        );
        Ok(reply)
    }
}

/// Resolve the API key from config, falling back to the environment.
fn resolve_api_key(config_key: Option<&str>) -> Result<SecretString, CoachError> {
    if let Some(key) = config_key.filter(|k| !k.is_empty()) {
        return Ok(SecretString::from(key));
    }

    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.is_empty() => Ok(SecretString::from(key)),
        _ => Err(CoachError::Config(format!(
            "completion API key not found. Set completion.api_key in config or the {API_KEY_ENV} environment variable."
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coach_core::ChatMessage;
    use serial_test::serial;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: &str) -> CompletionConfig {
        CompletionConfig {
            api_key: Some("sk-test".into()),
            base_url: base_url.to_string(),
            ..CompletionConfig::default()
        }
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            system_instruction: "คุณคือผู้สัมภาษณ์".into(),
            messages: vec![
                ChatMessage {
                    role: ChatRole::Assistant,
                    content: "สวัสดีครับ".into(),
                },
                ChatMessage {
                    role: ChatRole::User,
                    content: "I have 5 years of experience.".into(),
                },
            ],
            job_title: "Backend Engineer".into(),
        }
    }

    fn body_with(choices: serde_json::Value) -> serde_json::Value {
        serde_json::json!({"model": "typhoon-v1.5x-70b-instruct", "choices": choices})
    }

    #[test]
    fn api_request_prepends_system_message() {
        let provider = TyphoonProvider::new(&config("http://localhost")).unwrap();
        let api = provider.to_api_request(&request());
        let roles: Vec<&str> = api.messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "assistant", "user"]);
        assert_eq!(api.messages[0].content, "คุณคือผู้สัมภาษณ์");
        assert_eq!(api.max_tokens, 512);
        assert!(!api.stream);
    }

    #[tokio::test]
    async fn complete_returns_trimmed_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "model": "typhoon-v1.5x-70b-instruct",
                "max_tokens": 512,
                "top_p": 0.95
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(body_with(serde_json::json!([
                {"message": {"role": "assistant", "content": "  Can you describe a challenging bug you fixed?\n"}}
            ]))))
            .mount(&server)
            .await;

        let provider = TyphoonProvider::new(&config(&server.uri())).unwrap();
        let reply = provider.complete(request()).await.unwrap();
        assert_eq!(reply.text, "Can you describe a challenging bug you fixed?");
        assert_eq!(reply.model, "typhoon-v1.5x-70b-instruct");
    }

    #[tokio::test]
    async fn empty_choices_is_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body_with(serde_json::json!([]))))
            .mount(&server)
            .await;

        let provider = TyphoonProvider::new(&config(&server.uri())).unwrap();
        let err = provider.complete(request()).await.unwrap_err();
        assert!(err.to_string().contains("choices[0].message.content"));
    }

    #[tokio::test]
    async fn blank_content_is_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body_with(serde_json::json!([
                {"message": {"role": "assistant", "content": "   "}}
            ]))))
            .mount(&server)
            .await;

        let provider = TyphoonProvider::new(&config(&server.uri())).unwrap();
        assert!(provider.complete(request()).await.is_err());
    }

    #[test]
    fn resolve_api_key_prefers_config() {
        use secrecy::ExposeSecret;
        let key = resolve_api_key(Some("sk-config")).unwrap();
        assert_eq!(key.expose_secret(), "sk-config");
    }

    #[test]
    #[serial]
    fn resolve_api_key_falls_back_to_env() {
        use secrecy::ExposeSecret;
        // SAFETY: test-only env mutation, serialized with #[serial].
        unsafe { std::env::set_var(API_KEY_ENV, "sk-env") };
        let key = resolve_api_key(Some(""));
        unsafe { std::env::remove_var(API_KEY_ENV) };
        assert_eq!(key.unwrap().expose_secret(), "sk-env");
    }

    #[test]
    #[serial]
    fn missing_api_key_is_a_config_error() {
        // SAFETY: test-only env mutation, serialized with #[serial].
        unsafe { std::env::remove_var(API_KEY_ENV) };
        let err = resolve_api_key(None).unwrap_err();
        assert!(matches!(err, CoachError::Config(msg) if msg.contains(API_KEY_ENV)));
    }
}
