//! Caller-owned highlight state.
//!
//! A [`HighlightSession`] keeps the quotes from the last successful load so
//! the caller can ask for a fresh selection without re-reading the file.
//! Extraction and sampling stay stateless; this is the only place where
//! anything is retained between calls.

use remix_core::Document;

use crate::highlights::{ExtractionError, HighlightExtractor, QuoteCollection};
use crate::sampler::{DEFAULT_MAX_SELECTION, Sampler, Selection};

/// Quotes retained between selections, plus the current selection.
#[derive(Debug, Clone)]
pub struct HighlightSession {
    quotes: QuoteCollection,
    selection: Selection,
    max_selection: usize,
}

impl Default for HighlightSession {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SELECTION)
    }
}

impl HighlightSession {
    /// Empty session drawing at most `max_selection` quotes at a time.
    pub fn new(max_selection: usize) -> Self {
        Self {
            quotes: QuoteCollection::default(),
            selection: Selection::default(),
            max_selection,
        }
    }

    /// Extract quotes from `document` and draw a first selection.
    ///
    /// On failure the previous quotes and selection are cleared so stale
    /// results are never shown next to the error.
    pub fn load(
        &mut self,
        extractor: &HighlightExtractor,
        document: &Document,
        sampler: &mut Sampler,
    ) -> Result<&Selection, ExtractionError> {
        match extractor.extract(document.lines()) {
            Ok(quotes) => {
                self.quotes = quotes;
                Ok(self.resample(sampler))
            }
            Err(err) => {
                self.clear();
                Err(err)
            }
        }
    }

    /// Draw a new selection from the retained quotes.
    pub fn resample(&mut self, sampler: &mut Sampler) -> &Selection {
        self.selection = sampler.sample(&self.quotes, self.max_selection);
        &self.selection
    }

    /// Forget all quotes and the current selection.
    pub fn clear(&mut self) {
        self.quotes = QuoteCollection::default();
        self.selection = Selection::default();
    }

    /// Quotes from the last successful load.
    pub fn quotes(&self) -> &QuoteCollection {
        &self.quotes
    }

    /// The current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The current selection joined for display.
    pub fn selection_text(&self) -> String {
        self.selection.display()
    }

    /// Whether any quotes are loaded.
    pub fn is_loaded(&self) -> bool {
        !self.quotes.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn book(n: usize) -> Document {
        let mut lines = vec!["# Book".to_string(), "### Highlights".to_string()];
        lines.extend((0..n).map(|i| format!("- \"Quote {i}\"")));
        Document::from_lines(lines)
    }

    #[test]
    fn test_load_draws_bounded_selection() {
        let mut session = HighlightSession::default();
        let mut sampler = Sampler::seeded(9);
        let selection = session
            .load(&HighlightExtractor::new(), &book(10), &mut sampler)
            .unwrap();
        assert_eq!(selection.len(), 6);
        assert_eq!(session.quotes().len(), 10);
        assert!(session.is_loaded());
    }

    #[test]
    fn test_resample_uses_retained_quotes() {
        let mut session = HighlightSession::new(2);
        let mut sampler = Sampler::seeded(9);
        session
            .load(&HighlightExtractor::new(), &book(8), &mut sampler)
            .unwrap();

        for _ in 0..5 {
            let selection = session.resample(&mut sampler).clone();
            assert_eq!(selection.len(), 2);
            for quote in selection.quotes() {
                assert!(session.quotes().contains(quote));
            }
        }
    }

    #[test]
    fn test_failed_load_clears_previous_state() {
        let mut session = HighlightSession::default();
        let mut sampler = Sampler::seeded(9);
        let extractor = HighlightExtractor::new();
        session.load(&extractor, &book(3), &mut sampler).unwrap();
        assert!(session.is_loaded());

        let err = session
            .load(&extractor, &Document::from_text("# Nothing here"), &mut sampler)
            .unwrap_err();
        assert!(matches!(err, ExtractionError::SectionNotFound { .. }));
        assert!(!session.is_loaded());
        assert!(session.selection().is_empty());
        assert_eq!(session.selection_text(), "");
    }

    #[test]
    fn test_resample_without_quotes_is_empty() {
        let mut session = HighlightSession::default();
        let mut sampler = Sampler::seeded(1);
        assert!(session.resample(&mut sampler).is_empty());
    }

    #[test]
    fn test_selection_text_joins_quotes() {
        let mut session = HighlightSession::default();
        let mut sampler = Sampler::seeded(5);
        session
            .load(&HighlightExtractor::new(), &book(1), &mut sampler)
            .unwrap();
        assert_eq!(session.selection_text(), "Quote 0");
    }
}
