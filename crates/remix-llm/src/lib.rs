//! Language-model providers and the remix flow.
//!
//! [`llm`] abstracts the hosted model behind [`LlmProvider`];
//! [`remixer`] turns input text into platform posts with it.

pub mod llm;
pub mod remixer;

pub use llm::{
    ClaudeProvider, CompletionRequest, CompletionResponse, LlmProvider, Message,
    MockLlmProvider, Role, StopReason, TokenUsage,
};
pub use remixer::{Remix, RemixRequest, Remixer};
