use super::scrub::{api_error_message, sanitize_api_error};
use super::traits::Provider;
use super::types::{Completion, CompletionRequest};
use crate::error::CompletionError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI-compatible `/chat/completions` client.
pub struct OpenAiProvider {
    /// Pre-computed `"Bearer <key>"` header value (avoids `format!` per request).
    cached_auth_header: Option<String>,
    /// Pre-computed chat completions URL.
    cached_chat_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self::with_client(base_url, api_key, super::build_http_client())
    }

    pub fn with_client(base_url: &str, api_key: Option<&str>, client: Client) -> Self {
        let base_url = base_url.trim_end_matches('/');
        let cached_chat_url = if base_url.ends_with("chat/completions") {
            base_url.to_string()
        } else {
            format!("{base_url}/chat/completions")
        };

        Self {
            cached_auth_header: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(|k| format!("Bearer {k}")),
            cached_chat_url,
            client,
        }
    }

    fn build_request(request: &CompletionRequest) -> ChatRequest<'_> {
        ChatRequest {
            model: &request.model,
            messages: request
                .messages
                .iter()
                .map(|m| Message {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: request.temperature,
        }
    }

    fn into_completion(chat_response: ChatResponse) -> Completion {
        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty());

        Completion {
            content,
            model: chat_response.model,
            input_tokens: chat_response.usage.as_ref().map(|u| u.prompt_tokens),
            output_tokens: chat_response.usage.as_ref().map(|u| u.completion_tokens),
        }
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError> {
        let auth_header = self
            .cached_auth_header
            .as_ref()
            .ok_or(CompletionError::MissingApiKey)?;

        let response = self
            .client
            .post(&self.cached_chat_url)
            .header("Authorization", auth_header)
            .json(&Self::build_request(request))
            .send()
            .await
            .map_err(|error| {
                CompletionError::Request(format!(
                    "OpenAI request failed: {}",
                    sanitize_api_error(&error.to_string())
                ))
            })?;

        if !response.status().is_success() {
            return Err(CompletionError::Request(
                api_error_message("OpenAI", response).await,
            ));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|error| {
            CompletionError::Request(format!("OpenAI response JSON decode failed: {error}"))
        })?;

        Ok(Self::into_completion(chat_response))
    }
}
