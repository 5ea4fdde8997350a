//! LLM provider abstractions and implementations.

mod claude;
mod mock;
mod provider;

pub use claude::{ClaudeProvider, DEFAULT_MODEL};
pub use mock::MockLlmProvider;
pub use provider::{
    CompletionRequest, CompletionResponse, LlmProvider, Message, Role, StopReason, TokenUsage,
};
