//! The remix flow: input text in, platform posts out.
//!
//! A [`Remixer`] renders the platform prompt around the user's text, makes a
//! single completion call, and parses the numbered-list reply into exactly
//! [`POSTS_PER_REMIX`] posts.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use remix_content::{
    HighlightSession, POSTS_PER_REMIX, Platform, Post, build_prompt, parse_exact_posts,
};
use remix_core::{ConfigProvider, Error, Result};
use serde::{Deserialize, Serialize};

use crate::llm::{ClaudeProvider, CompletionRequest, LlmProvider, Message};

/// What to remix and for which platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemixRequest {
    /// Source text.
    pub text: String,

    /// Target platform; selects the default prompt.
    #[serde(default)]
    pub platform: Platform,

    /// Custom instructions replacing the platform prompt.
    #[serde(default)]
    pub prompt: Option<String>,
}

impl RemixRequest {
    /// Request for `text` on `platform` with the platform's own prompt.
    pub fn new(text: impl Into<String>, platform: Platform) -> Self {
        Self {
            text: text.into(),
            platform,
            prompt: None,
        }
    }

    /// Replace the platform prompt with custom instructions.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    fn instructions(&self) -> &str {
        match self.prompt.as_deref().map(str::trim) {
            Some(custom) if !custom.is_empty() => custom,
            _ => self.platform.prompt(),
        }
    }
}

/// The posts produced by one remix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Remix {
    /// Platform the posts were written for.
    pub platform: Platform,

    /// Generated posts, in the order the model listed them.
    pub posts: Vec<Post>,

    /// When the remix was produced.
    pub created_at: DateTime<Utc>,
}

impl Remix {
    /// Post bodies only.
    pub fn texts(&self) -> Vec<&str> {
        self.posts.iter().map(|p| p.text.as_str()).collect()
    }
}

/// Turns text into posts using an [`LlmProvider`].
#[derive(Clone)]
pub struct Remixer {
    provider: Arc<dyn LlmProvider>,
    max_tokens: u32,
}

impl Remixer {
    /// Remixer backed by `provider`.
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            max_tokens: 1024,
        }
    }

    /// Remixer backed by Claude, using the configured key, model, and token limit.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no API key is configured.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let provider = ClaudeProvider::new(config.api_key()?, config.model());
        Ok(Self::new(Arc::new(provider)).with_max_tokens(config.max_tokens()))
    }

    /// Sets the maximum tokens per completion.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Remix `request.text` into [`POSTS_PER_REMIX`] posts.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if the text is blank
    /// - [`Error::Llm`] if the model call fails
    /// - [`Error::InvalidData`] if the reply does not hold exactly six posts
    pub async fn remix(&self, request: RemixRequest) -> Result<Remix> {
        let text = request.text.trim();
        if text.is_empty() {
            return Err(Error::validation("Please enter some text to remix"));
        }

        log::info!(
            "Remixing {} chars of text for {}",
            text.chars().count(),
            request.platform
        );

        let content = build_prompt(request.instructions(), text);
        let completion = CompletionRequest::new(vec![Message::user(content)])
            .with_max_tokens(self.max_tokens);
        let response = self.provider.complete(completion).await?;
        log::debug!("Model used {} tokens", response.tokens_used.total());
        if response.stop_reason.is_truncated() {
            log::warn!("Reply hit the {} token cap and may be cut short", self.max_tokens);
        }

        let posts = parse_exact_posts(&response.content, POSTS_PER_REMIX)?;
        for (i, post) in posts.iter().enumerate() {
            if post.exceeds(request.platform) {
                log::warn!(
                    "Post {} is {} chars, over the {} limit of {}",
                    i + 1,
                    post.char_count(),
                    request.platform,
                    request.platform.char_limit()
                );
            }
        }

        Ok(Remix {
            platform: request.platform,
            posts,
            created_at: Utc::now(),
        })
    }

    /// Remix the current selection of a highlight session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the session has no selection.
    pub async fn remix_highlights(
        &self,
        session: &HighlightSession,
        platform: Platform,
    ) -> Result<Remix> {
        if session.selection().is_empty() {
            return Err(Error::validation(
                "Load a highlights file before remixing its quotes",
            ));
        }
        self.remix(RemixRequest::new(session.selection_text(), platform))
            .await
    }
}
