//! LLM provider abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use remix_core::Result;

/// A hosted language model answering one prompt at a time.
///
/// Tests swap in [`MockLlmProvider`](super::MockLlmProvider).
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Completes a prompt and returns the full response.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;
}

/// One prompt for the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Conversation turns, oldest first.
    pub messages: Vec<Message>,

    /// Cap on generated tokens.
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Request for `messages` with a 1024-token cap.
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            max_tokens: 1024,
        }
    }

    /// Sets the token cap.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// One turn of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who wrote the turn.
    pub role: Role,

    /// Turn text.
    pub content: String,
}

impl Message {
    /// A user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Author of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person asking for a remix.
    User,
}

/// Response from an LLM completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated content
    pub content: String,

    /// Token usage statistics
    pub tokens_used: TokenUsage,

    /// Why the model stopped generating
    pub stop_reason: StopReason,
}

/// Token usage statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Input tokens consumed
    pub input: u64,

    /// Output tokens generated
    pub output: u64,
}

impl TokenUsage {
    /// Total tokens used (input + output).
    pub fn total(&self) -> u64 {
        self.input + self.output
    }
}

/// Why the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum StopReason {
    /// Finished its answer.
    EndTurn,

    /// Ran into `max_tokens`; the reply is probably cut short.
    MaxTokens,

    /// Any other reason reported by the provider.
    #[serde(other)]
    Other,
}

impl StopReason {
    /// Whether the reply was cut off by the token cap.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::MaxTokens)
    }
}
