//! Target platforms and their prompt templates.

use std::fmt;
use std::str::FromStr;

use remix_core::Error;
use serde::{Deserialize, Serialize};

/// Number of posts every remix must produce.
pub const POSTS_PER_REMIX: usize = 6;

const TWITTER_PROMPT: &str = r#"You are a social media expert. Please transform the following text into 6 engaging, viral-style tweets. Each tweet should be concise (max 280 characters), engaging, and maintain the key information while adding personality.

IMPORTANT: Format your response as a numbered list with EXACTLY 6 tweets, one per line, starting each line with just the number and a period (e.g. "1.", "2.", etc). Do not add any other formatting or text.

Remember:
- You are a social media expert
- Keep each tweet under 280 characters
- Make them engaging and shareable
- Maintain the key information
- Do not use any hashtags
- Each tweet should be able to stand alone"#;

const INSTAGRAM_PROMPT: &str = r#"You are a social media expert. Please transform the following text into 6 engaging Instagram captions. Each caption should be warm, visual, and conversational, open with a strong hook line, and stay under 2200 characters.

IMPORTANT: Format your response as a numbered list with EXACTLY 6 captions, one per line, starting each line with just the number and a period (e.g. "1.", "2.", etc). Do not add any other formatting or text, and do not break a caption across lines.

Remember:
- You are a social media expert
- Lead with a hook that stops the scroll
- Keep the tone personal and authentic
- Maintain the key information
- End with a question or call to action
- Each caption should be able to stand alone"#;

const LINKEDIN_PROMPT: &str = r#"You are a social media expert. Please transform the following text into 6 professional LinkedIn posts. Each post should share a clear insight or lesson, read as thoughtful and credible, and stay under 3000 characters.

IMPORTANT: Format your response as a numbered list with EXACTLY 6 posts, one per line, starting each line with just the number and a period (e.g. "1.", "2.", etc). Do not add any other formatting or text, and do not break a post across lines.

Remember:
- You are a social media expert
- Open with a one-sentence insight
- Keep the tone professional but human
- Maintain the key information
- Do not use any hashtags
- Each post should be able to stand alone"#;

/// Social platform a remix is written for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Twitter / X.
    #[default]
    Twitter,
    /// Instagram.
    Instagram,
    /// LinkedIn.
    LinkedIn,
}

impl Platform {
    /// Every supported platform.
    pub const ALL: [Platform; 3] = [Platform::Twitter, Platform::Instagram, Platform::LinkedIn];

    /// Lowercase identifier used on the wire and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Twitter => "twitter",
            Self::Instagram => "instagram",
            Self::LinkedIn => "linkedin",
        }
    }

    /// Instruction template sent ahead of the input text.
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Twitter => TWITTER_PROMPT,
            Self::Instagram => INSTAGRAM_PROMPT,
            Self::LinkedIn => LINKEDIN_PROMPT,
        }
    }

    /// Maximum post length in characters.
    pub fn char_limit(&self) -> usize {
        match self {
            Self::Twitter => 280,
            Self::Instagram => 2200,
            Self::LinkedIn => 3000,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::validation(format!(
                    "Unknown platform '{s}' (expected twitter, instagram, or linkedin)"
                ))
            })
    }
}

/// Combine an instruction template with the user's text.
pub fn build_prompt(prompt: &str, text: &str) -> String {
    format!("{prompt}\n\nInput text: {text}")
}
