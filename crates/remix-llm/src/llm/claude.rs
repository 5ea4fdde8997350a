//! Claude API provider implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::provider::{
    CompletionRequest, CompletionResponse, LlmProvider, Message, StopReason, TokenUsage,
};
use remix_core::{Error, Result};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "claude-3-opus-20240229";

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// LLM provider using Anthropic's Claude API.
pub struct ClaudeProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl ClaudeProvider {
    /// Provider for `model`, authenticated with `api_key`.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Points the provider at a different API host (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The model this provider requests.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }
}

/// Body of a `POST /v1/messages` call.
#[derive(Serialize)]
struct MessagesBody<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: &'a [Message],
}

/// The parts of a Messages API reply the remix flow reads.
#[derive(Deserialize)]
struct MessagesReply {
    #[serde(default)]
    content: Vec<ContentBlock>,
    usage: Usage,
    stop_reason: Option<StopReason>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    input_tokens: u64,
    output_tokens: u64,
}

impl MessagesReply {
    /// Text of the leading block, which must be a non-empty text block.
    fn into_text(self) -> Option<String> {
        let first = self.content.into_iter().next()?;
        match (first.kind.as_str(), first.text) {
            ("text", Some(text)) if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

#[async_trait]
impl LlmProvider for ClaudeProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let body = MessagesBody {
            model: &self.model,
            max_tokens: request.max_tokens,
            messages: &request.messages,
        };

        log::debug!("POST {} ({})", self.messages_url(), self.model);
        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::llm_with_source("Failed to call Claude API", e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "no response body".to_string());
            return Err(Error::llm(format!("Claude API error {status}: {detail}")));
        }

        let reply: MessagesReply = response
            .json()
            .await
            .map_err(|e| Error::llm_with_source("Failed to parse Claude response", e))?;

        let tokens_used = TokenUsage {
            input: reply.usage.input_tokens,
            output: reply.usage.output_tokens,
        };
        let stop_reason = reply.stop_reason.unwrap_or(StopReason::Other);
        let content = reply
            .into_text()
            .ok_or_else(|| Error::llm("Unexpected response format from Claude API"))?;

        log::debug!(
            "Claude replied with {} chars ({} input / {} output tokens)",
            content.len(),
            tokens_used.input,
            tokens_used.output
        );

        Ok(CompletionResponse {
            content,
            tokens_used,
            stop_reason,
        })
    }
}
