//! LLM Client — the single point of entry for chat-completion calls.
//!
//! Handlers depend on the `ChatProvider` trait only; `CohereClient` is the
//! production implementation over the Cohere v2 Chat API.
//!
//! Model: command-a-03-2025 (hardcoded, sampling temperature fixed at 0.3)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const CHAT_PATH: &str = "/v2/chat";
/// The model used for all coaching calls.
pub const MODEL: &str = "command-a-03-2025";
pub const TEMPERATURE: f32 = 0.3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Provider API key is not configured")]
    MissingApiKey,

    #[error("Generation stopped early (finish_reason {reason})")]
    Incomplete { reason: String, partial_text: String },
}

impl LlmError {
    /// Text the provider produced before failing, if any.
    pub fn partial_text(&self) -> Option<&str> {
        match self {
            LlmError::Incomplete { partial_text, .. } if !partial_text.is_empty() => {
                Some(partial_text)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub message: Option<AssistantMessage>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AssistantMessage {
    #[serde(default)]
    pub content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
pub struct ContentPart {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub billed_units: Option<TokenCounts>,
}

#[derive(Debug, Deserialize)]
pub struct TokenCounts {
    #[serde(default)]
    pub input_tokens: u32,
    #[serde(default)]
    pub output_tokens: u32,
}

impl ChatResponse {
    /// Text of the first content part, or `""` when there is none.
    pub fn text(&self) -> &str {
        self.message
            .as_ref()
            .and_then(|m| m.content.first())
            .and_then(|part| part.text.as_deref())
            .unwrap_or("")
    }

    fn stopped_early(&self) -> Option<&str> {
        match self.finish_reason.as_deref() {
            Some(reason @ ("ERROR" | "TIMEOUT")) => Some(reason),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    message: String,
}

/// A chat-completion capability: one user turn in, generated text out.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn chat(&self, prompt: &str) -> Result<ChatResponse, LlmError>;

    /// Provider name used in logs.
    fn name(&self) -> &str;
}

/// Cohere v2 Chat API client. Built once at startup and shared by all requests.
#[derive(Clone)]
pub struct CohereClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl CohereClient {
    pub fn new(api_key: String, base_url: &str) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().build()?,
            api_key,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), CHAT_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatProvider for CohereClient {
    /// Single round trip: no retry, no streaming, transport-default timeout.
    async fn chat(&self, prompt: &str) -> Result<ChatResponse, LlmError> {
        if self.api_key.is_empty() {
            return Err(LlmError::MissingApiKey);
        }

        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header("accept", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ProviderError>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = serde_json::from_str(&body)?;

        if let Some(reason) = chat.stopped_early() {
            return Err(LlmError::Incomplete {
                reason: reason.to_string(),
                partial_text: chat.text().to_string(),
            });
        }

        if let Some(units) = chat.usage.as_ref().and_then(|u| u.billed_units.as_ref()) {
            debug!(
                "Chat call succeeded: input_tokens={}, output_tokens={}",
                units.input_tokens, units.output_tokens
            );
        }

        Ok(chat)
    }

    fn name(&self) -> &str {
        "cohere"
    }
}
