//! Mock LLM provider for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::provider::{CompletionRequest, CompletionResponse, LlmProvider, StopReason, TokenUsage};
use remix_core::{Error, Result};

/// Provider that replays canned replies and records what it was asked.
#[derive(Clone)]
pub struct MockLlmProvider {
    state: Arc<Mutex<MockState>>,
}

struct MockState {
    canned: Vec<String>,
    index: usize,
    requests: Vec<CompletionRequest>,
}

impl MockLlmProvider {
    /// Replays `responses` in order, wrapping around after the last one.
    ///
    /// # Examples
    ///
    /// ```
    /// use remix_llm::MockLlmProvider;
    ///
    /// let provider = MockLlmProvider::new(vec![
    ///     "1. First\n2. Second".to_string(),
    ///     "1. Third\n2. Fourth".to_string(),
    /// ]);
    /// ```
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                canned: responses,
                index: 0,
                requests: Vec::new(),
            })),
        }
    }

    /// Always replies with `response`.
    pub fn with_response(response: impl Into<String>) -> Self {
        Self::new(vec![response.into()])
    }

    /// Requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.state.lock().await.requests.clone()
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let mut state = self.state.lock().await;
        state.requests.push(request);

        if state.canned.is_empty() {
            return Err(Error::llm("Mock provider has no canned responses"));
        }

        let content = state.canned[state.index].clone();
        state.index = (state.index + 1) % state.canned.len();

        Ok(CompletionResponse {
            content,
            tokens_used: TokenUsage {
                input: 10,
                output: 20,
            },
            stop_reason: StopReason::EndTurn,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::llm::Message;

    fn ask(text: &str) -> CompletionRequest {
        CompletionRequest::new(vec![Message::user(text)])
    }

    #[tokio::test]
    async fn test_replies_cycle_in_order() {
        let provider = MockLlmProvider::new(vec!["1. First".into(), "1. Second".into()]);

        let mut replies = Vec::new();
        for _ in 0..3 {
            replies.push(provider.complete(ask("remix")).await.unwrap().content);
        }
        assert_eq!(replies, vec!["1. First", "1. Second", "1. First"]);
    }

    #[tokio::test]
    async fn test_clones_share_recorded_requests() {
        let provider = MockLlmProvider::with_response("ok");
        let clone = provider.clone();

        provider.complete(ask("one")).await.unwrap();
        clone.complete(ask("two").with_max_tokens(64)).await.unwrap();

        let requests = provider.requests().await;
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].messages[0].content, "two");
        assert_eq!(requests[1].max_tokens, 64);
    }

    #[tokio::test]
    async fn test_reports_end_turn() {
        let response = MockLlmProvider::with_response("done")
            .complete(ask("x"))
            .await
            .unwrap();
        assert_eq!(response.stop_reason, StopReason::EndTurn);
        assert!(response.tokens_used.total() > 0);
    }

    #[tokio::test]
    async fn test_without_responses_errors_but_records() {
        let provider = MockLlmProvider::new(vec![]);
        assert!(provider.complete(ask("x")).await.is_err());
        assert_eq!(provider.requests().await.len(), 1);
    }
}
