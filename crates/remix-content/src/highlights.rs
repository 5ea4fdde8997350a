//! Quote extraction from a markdown highlights section.
//!
//! Reading apps export highlights as a bulleted list under a fixed heading:
//!
//! ```text
//! ### Highlights
//! - "A short quote."
//! - "A longer quote that the exporter
//!   soft-wrapped onto a second line."
//!
//! ### Notes
//! ```
//!
//! [`HighlightExtractor`] finds that heading, walks forward until the next
//! heading, and turns each bullet (plus its continuation lines) into one
//! quote with the bullet marker and surrounding quotation marks removed.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Heading that opens the highlights section.
pub const HIGHLIGHTS_MARKER: &str = "### Highlights";

const BULLET: char = '-';
const QUOTE_GLYPHS: &[char] = &['"', '\u{201C}', '\u{201D}'];

#[allow(clippy::expect_used)]
static ATX_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6}(\s|$)").expect("heading pattern is valid"));

/// Why a document yielded no quotes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// No line matches the section marker.
    #[error("Could not find '{marker}' section in the markdown file")]
    SectionNotFound {
        /// Marker that was searched for.
        marker: String,
    },

    /// The section exists but holds no bullets before the next heading.
    #[error("No quotes found in the '{marker}' section")]
    NoQuotesFound {
        /// Marker of the empty section.
        marker: String,
    },
}

impl From<ExtractionError> for remix_core::Error {
    fn from(err: ExtractionError) -> Self {
        remix_core::Error::validation(err.to_string())
    }
}

/// Quotes in the order they appear in the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteCollection(Vec<String>);

impl QuoteCollection {
    /// Number of quotes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no quotes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over quotes in extraction order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Quotes as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Whether `quote` is one of the extracted quotes.
    pub fn contains(&self, quote: &str) -> bool {
        self.0.iter().any(|q| q == quote)
    }
}

impl From<Vec<String>> for QuoteCollection {
    fn from(quotes: Vec<String>) -> Self {
        Self(quotes)
    }
}

impl<'a> IntoIterator for &'a QuoteCollection {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Extracts quotes from the section opened by a marker heading.
///
/// Stateless: one extractor may be shared and reused across documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightExtractor {
    marker: String,
}

impl Default for HighlightExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl HighlightExtractor {
    /// Extractor for the standard `### Highlights` section.
    pub fn new() -> Self {
        Self::with_marker(HIGHLIGHTS_MARKER)
    }

    /// Extractor for a custom section heading.
    pub fn with_marker(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into().trim().to_string(),
        }
    }

    /// The heading this extractor looks for.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Extract quotes from `lines`.
    ///
    /// # Errors
    ///
    /// - [`ExtractionError::SectionNotFound`] when no line equals the marker
    /// - [`ExtractionError::NoQuotesFound`] when the section has no bullets
    pub fn extract<S: AsRef<str>>(
        &self,
        lines: &[S],
    ) -> Result<QuoteCollection, ExtractionError> {
        let start = lines
            .iter()
            .position(|line| line.as_ref().trim() == self.marker)
            .ok_or_else(|| ExtractionError::SectionNotFound {
                marker: self.marker.clone(),
            })?;

        let mut quotes = Vec::new();
        let mut current: Option<Vec<String>> = None;

        for (offset, line) in lines[start + 1..].iter().enumerate() {
            let trimmed = line.as_ref().trim();
            if trimmed.is_empty() {
                continue;
            }
            if ATX_HEADING.is_match(trimmed) {
                break;
            }

            if let Some(rest) = trimmed.strip_prefix(BULLET) {
                finish_quote(current.take(), &mut quotes);
                let mut fragments = Vec::new();
                push_fragment(&mut fragments, rest);
                current = Some(fragments);
            } else if let Some(fragments) = current.as_mut() {
                push_fragment(fragments, trimmed);
            } else {
                log::debug!(
                    "Skipping text before first bullet at line {}",
                    start + offset + 2
                );
            }
        }
        finish_quote(current, &mut quotes);

        if quotes.is_empty() {
            return Err(ExtractionError::NoQuotesFound {
                marker: self.marker.clone(),
            });
        }

        log::debug!("Extracted {} quotes under '{}'", quotes.len(), self.marker);
        Ok(QuoteCollection(quotes))
    }
}

/// Extract quotes from the standard `### Highlights` section.
pub fn extract<S: AsRef<str>>(lines: &[S]) -> Result<QuoteCollection, ExtractionError> {
    HighlightExtractor::new().extract(lines)
}

fn push_fragment(fragments: &mut Vec<String>, raw: &str) {
    let text = strip_quote_glyphs(raw);
    if !text.is_empty() {
        fragments.push(text.to_string());
    }
}

fn finish_quote(fragments: Option<Vec<String>>, quotes: &mut Vec<String>) {
    if let Some(fragments) = fragments {
        let quote = fragments.join(" ");
        if !quote.is_empty() {
            quotes.push(quote);
        }
    }
}

/// Remove at most one leading and one trailing quotation mark.
fn strip_quote_glyphs(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix(QUOTE_GLYPHS) {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix(QUOTE_GLYPHS) {
        text = rest;
    }
    text.trim()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_extract_merges_wrapped_bullets_and_stops_at_next_heading() {
        let lines = [
            "### Highlights",
            "- \"First quote.\"",
            "- \"Second",
            "  quote continues.\"",
            "### Notes",
            "- ignored",
        ];
        let quotes = extract(&lines).unwrap();
        assert_eq!(
            quotes.as_slice(),
            &["First quote.", "Second quote continues."]
        );
    }

    #[test]
    fn test_extract_marker_only_has_no_quotes() {
        let err = extract(&["### Highlights"]).unwrap_err();
        assert_eq!(
            err,
            ExtractionError::NoQuotesFound {
                marker: HIGHLIGHTS_MARKER.to_string()
            }
        );
    }

    #[test]
    fn test_extract_without_marker() {
        let lines = ["# Book", "- \"Quote\""];
        let err = extract(&lines).unwrap_err();
        assert!(matches!(err, ExtractionError::SectionNotFound { .. }));
    }

    #[test]
    fn test_marker_must_match_exactly() {
        let lines = ["## Highlights", "- \"Quote\""];
        assert!(matches!(
            extract(&lines),
            Err(ExtractionError::SectionNotFound { .. })
        ));

        let lines = ["   ### Highlights   ", "- \"Quote\""];
        assert_eq!(extract(&lines).unwrap().as_slice(), &["Quote"]);
    }

    #[test]
    fn test_first_marker_wins() {
        let lines = [
            "### Highlights",
            "- one",
            "### Highlights",
            "- two",
        ];
        assert_eq!(extract(&lines).unwrap().as_slice(), &["one"]);
    }

    #[test]
    fn test_blank_lines_between_bullets_are_skipped() {
        let lines = ["### Highlights", "", "- \"A\"", "", "", "- \"B\"", ""];
        assert_eq!(extract(&lines).unwrap().as_slice(), &["A", "B"]);
    }

    #[test]
    fn test_heading_before_any_bullet_yields_no_quotes() {
        let lines = ["### Highlights", "", "## Chapter 2", "- \"late\""];
        assert!(matches!(
            extract(&lines),
            Err(ExtractionError::NoQuotesFound { .. })
        ));
    }

    #[test]
    fn test_continuation_before_first_bullet_is_skipped() {
        let lines = [
            "### Highlights",
            "Exported from my reader",
            "- \"Kept\"",
        ];
        assert_eq!(extract(&lines).unwrap().as_slice(), &["Kept"]);
    }

    #[test]
    fn test_only_stray_text_yields_no_quotes() {
        let lines = ["### Highlights", "no bullets here"];
        assert!(matches!(
            extract(&lines),
            Err(ExtractionError::NoQuotesFound { .. })
        ));
    }

    #[test]
    fn test_curly_quotes_are_stripped() {
        let lines = ["### Highlights", "- \u{201C}Curly quote.\u{201D}"];
        assert_eq!(extract(&lines).unwrap().as_slice(), &["Curly quote."]);
    }

    #[test]
    fn test_unquoted_bullets_are_kept_verbatim() {
        let lines = ["### Highlights", "-No space after dash", "- plain text"];
        assert_eq!(
            extract(&lines).unwrap().as_slice(),
            &["No space after dash", "plain text"]
        );
    }

    #[test]
    fn test_inner_quotes_survive() {
        let lines = ["### Highlights", "- \"He said \"no\" twice\""];
        assert_eq!(
            extract(&lines).unwrap().as_slice(),
            &["He said \"no\" twice"]
        );
    }

    #[test]
    fn test_empty_bullets_are_dropped() {
        let lines = ["### Highlights", "-", "- \"\"", "- \"Real\""];
        assert_eq!(extract(&lines).unwrap().as_slice(), &["Real"]);
    }

    #[test]
    fn test_only_empty_bullets_yields_no_quotes() {
        let lines = ["### Highlights", "-", "- \"\""];
        assert!(matches!(
            extract(&lines),
            Err(ExtractionError::NoQuotesFound { .. })
        ));
    }

    #[test]
    fn test_hashtag_text_is_not_a_heading() {
        let lines = ["### Highlights", "- \"Ship it", "#buildinpublic\""];
        assert_eq!(
            extract(&lines).unwrap().as_slice(),
            &["Ship it #buildinpublic"]
        );
    }

    #[test]
    fn test_three_line_quote() {
        let lines = [
            "### Highlights",
            "- \"one",
            "two",
            "three\"",
            "- \"four\"",
        ];
        assert_eq!(
            extract(&lines).unwrap().as_slice(),
            &["one two three", "four"]
        );
    }

    #[test]
    fn test_custom_marker() {
        let extractor = HighlightExtractor::with_marker("## Quotes ");
        assert_eq!(extractor.marker(), "## Quotes");
        let lines = ["## Quotes", "- \"Custom\"", "## Other"];
        assert_eq!(extractor.extract(&lines).unwrap().as_slice(), &["Custom"]);

        let err = extractor.extract(&["### Highlights"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not find '## Quotes' section in the markdown file"
        );
    }

    #[test]
    fn test_extraction_error_converts_to_validation() {
        let err: remix_core::Error = ExtractionError::NoQuotesFound {
            marker: HIGHLIGHTS_MARKER.to_string(),
        }
        .into();
        assert!(err.is_user_facing());
        assert_eq!(
            err.to_string(),
            "No quotes found in the '### Highlights' section"
        );
    }

    #[test]
    fn test_extract_accepts_owned_lines() {
        let lines: Vec<String> = vec!["### Highlights".into(), "- \"Owned\"".into()];
        let quotes = extract(&lines).unwrap();
        assert_eq!(quotes.len(), 1);
        assert!(quotes.contains("Owned"));
    }

    fn word() -> impl Strategy<Value = String> {
        "[a-z]{1,8}"
    }

    proptest! {
        #[test]
        fn prop_one_quote_per_bullet(
            entries in prop::collection::vec(prop::collection::vec(word(), 1..4), 1..12)
        ) {
            let mut lines = vec!["# Book".to_string(), HIGHLIGHTS_MARKER.to_string()];
            for entry in &entries {
                lines.push(format!("- \"{}", entry[0]));
                for extra in &entry[1..] {
                    lines.push(format!("  {extra}"));
                }
                if let Some(last) = lines.last_mut() {
                    last.push('"');
                }
            }
            lines.push("### Notes".to_string());
            lines.push("- not a highlight".to_string());

            let quotes = extract(&lines).unwrap();
            prop_assert_eq!(quotes.len(), entries.len());
            for (quote, entry) in quotes.iter().zip(&entries) {
                prop_assert_eq!(quote, &entry.join(" "));
            }
        }

        #[test]
        fn prop_missing_marker_is_section_not_found(
            lines in prop::collection::vec("[a-z #\"-]{0,20}", 0..20)
        ) {
            prop_assume!(lines.iter().all(|l| l.trim() != HIGHLIGHTS_MARKER));
            prop_assert!(
                matches!(
                    extract(&lines),
                    Err(ExtractionError::SectionNotFound { .. })
                ),
                "expected SectionNotFound"
            );
        }

        #[test]
        fn prop_section_without_bullets_is_no_quotes_found(
            prose in prop::collection::vec("[a-z \"]{0,20}", 0..10),
            next_section in prop::option::of((1..=6usize, word(), prop::collection::vec(word(), 1..5)))
        ) {
            let mut lines = vec!["# Book".to_string(), HIGHLIGHTS_MARKER.to_string()];
            lines.extend(prose);
            if let Some((level, title, bullets)) = next_section {
                lines.push(format!("{} {title}", "#".repeat(level)));
                lines.extend(bullets.iter().map(|b| format!("- \"{b}\"")));
            }

            prop_assert_eq!(
                extract(&lines),
                Err(ExtractionError::NoQuotesFound {
                    marker: HIGHLIGHTS_MARKER.to_string(),
                })
            );
        }
    }
}
