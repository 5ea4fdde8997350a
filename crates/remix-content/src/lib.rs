//! Highlight extraction, sampling, and post parsing.
//!
//! # Modules
//!
//! - [`highlights`]: Extract quotes from a markdown highlights section
//! - [`sampler`]: Bounded random selection over extracted quotes
//! - [`session`]: Caller-owned state retained between selections
//! - [`platform`]: Target platforms and their prompt templates
//! - [`posts`]: Parse the model's numbered-list reply into posts

#![doc = include_str!("../README.md")]

pub mod highlights;
pub mod platform;
pub mod posts;
pub mod sampler;
pub mod session;

pub use highlights::{
    ExtractionError, HIGHLIGHTS_MARKER, HighlightExtractor, QuoteCollection, extract,
};
pub use platform::{POSTS_PER_REMIX, Platform, build_prompt};
pub use posts::{Post, parse_exact_posts, parse_posts};
pub use sampler::{DEFAULT_MAX_SELECTION, Sampler, Selection};
pub use session::HighlightSession;
