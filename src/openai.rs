use crate::config::Config;
use crate::error::UpstreamError;
use crate::prompts::PromptPair;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// A text-generation backend: one prompt pair in, one completion out.
///
/// Implementations make exactly one upstream call per invocation and never
/// retry; callers decide whether a failure is fatal or recoverable.
pub trait ModelClient: Send + Sync {
    fn complete(
        &self,
        prompt: &PromptPair,
        max_tokens: u32,
        temperature: f32,
    ) -> impl Future<Output = Result<String, UpstreamError>> + Send;
}

/// OpenAI Chat Completion request
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Check if a model is a reasoning model that doesn't support temperature
fn is_reasoning_model(model: &str) -> bool {
    model.starts_with("gpt-5")
        || model.starts_with("o1")
        || model.starts_with("o3")
        || model.starts_with("o4")
}

/// Chat Completions client, constructed once at startup and shared by handlers.
#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    api_url: String,
    timeout: Duration,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("model", &self.model)
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        api_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(UpstreamError::Transport)?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
            api_url: api_url.into(),
            timeout,
        })
    }

    /// Build a client from configuration; `None` when no API key is configured.
    pub fn from_config(config: &Config) -> Result<Option<Self>, UpstreamError> {
        config
            .openai_api_key
            .as_ref()
            .map(|key| {
                Self::new(
                    key.clone(),
                    config.openai_model.clone(),
                    config.openai_api_url.clone(),
                    config.model_timeout,
                )
            })
            .transpose()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, prompt: &PromptPair, max_tokens: u32, temperature: f32) -> ChatRequest {
        // Reasoning models take max_completion_tokens and reject temperature
        let is_reasoning = is_reasoning_model(&self.model);

        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: prompt.system.clone(),
                },
                Message {
                    role: "user".to_string(),
                    content: prompt.user.clone(),
                },
            ],
            max_tokens: (!is_reasoning).then_some(max_tokens),
            max_completion_tokens: is_reasoning.then_some(max_tokens),
            temperature: (!is_reasoning).then_some(temperature),
        }
    }

    async fn send(&self, request: &ChatRequest) -> Result<String, UpstreamError> {
        let response = self
            .http
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Malformed(e.to_string()))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| UpstreamError::Malformed("response contained no choices".to_string()))
    }

    fn classify(&self, error: reqwest::Error) -> UpstreamError {
        if error.is_timeout() {
            UpstreamError::Timeout(self.timeout)
        } else {
            UpstreamError::Transport(error)
        }
    }
}

impl ModelClient for OpenAiClient {
    async fn complete(
        &self,
        prompt: &PromptPair,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, UpstreamError> {
        let request = self.build_request(prompt, max_tokens, temperature);
        debug!(
            "Calling {} (max tokens {}, prompt {} chars)",
            self.model,
            max_tokens,
            prompt.system.len() + prompt.user.len()
        );
        self.send(&request).await
    }
}
