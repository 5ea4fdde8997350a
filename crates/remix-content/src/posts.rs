//! Parsing the model's numbered-list reply into posts.

use std::sync::LazyLock;

use regex::Regex;
use remix_core::{Error, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::platform::Platform;

const TWEET_INTENT_URL: &str = "https://twitter.com/intent/tweet";

#[allow(clippy::expect_used)]
static LIST_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s*").expect("list prefix pattern is valid"));

/// One generated post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Post body, without the list number.
    pub text: String,
}

impl Post {
    /// Create a post from its text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Length in characters (not bytes).
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the post is too long for `platform`.
    pub fn exceeds(&self, platform: Platform) -> bool {
        self.char_count() > platform.char_limit()
    }

    /// Link that opens the Twitter compose box pre-filled with this post.
    pub fn tweet_intent_url(&self) -> Result<Url> {
        Url::parse_with_params(TWEET_INTENT_URL, &[("text", self.text.as_str())])
            .map_err(|e| Error::invalid_data(format!("tweet link: {e}")))
    }
}

/// Split a reply into posts: one per non-blank line, list numbers removed.
pub fn parse_posts(reply: &str) -> Vec<String> {
    reply
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| LIST_PREFIX.replace(line, "").trim().to_string())
        .collect()
}

/// Parse a reply that must contain exactly `expected` posts.
///
/// # Errors
///
/// Returns [`Error::InvalidData`] when the count differs.
pub fn parse_exact_posts(reply: &str, expected: usize) -> Result<Vec<Post>> {
    let posts = parse_posts(reply);
    if posts.len() != expected {
        log::warn!(
            "Model returned {} posts, expected {}",
            posts.len(),
            expected
        );
        return Err(Error::invalid_data(format!(
            "Expected exactly {expected} posts in response"
        )));
    }
    Ok(posts.into_iter().map(Post::new).collect())
}
