//! Markdown document loading.
//!
//! The highlight extractor works on plain lines. This module owns everything
//! before that point: extension checks, existence checks, and decoding the
//! file into a [`Document`].

use std::path::Path;

use tokio::fs;

use crate::{Error, Result};

/// File extensions accepted as markdown.
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// An ordered, immutable sequence of text lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Split raw text on line breaks. `\r\n` endings are tolerated.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    /// Build a document from already-split lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// The document's lines, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the document has no lines at all.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Whether `path` carries a markdown extension (case-insensitive).
pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|md| ext.eq_ignore_ascii_case(md))
        })
        .unwrap_or(false)
}

/// Load a markdown file into a [`Document`].
///
/// # Errors
///
/// - [`Error::Validation`] if the path is not a markdown file
/// - [`Error::NotFound`] if the file does not exist
/// - [`Error::IoWithPath`] if the existence check or the read fails
pub async fn load_document(path: &Path) -> Result<Document> {
    if !is_markdown(path) {
        return Err(Error::validation("Please select a markdown (.md) file"));
    }

    let exists = fs::try_exists(path)
        .await
        .map_err(|e| Error::io_with_path(e, path))?;
    if !exists {
        return Err(Error::not_found(format!("{}", path.display())));
    }

    let text = fs::read_to_string(path)
        .await
        .map_err(|e| Error::io_with_path(e, path))?;
    let document = Document::from_text(&text);
    log::debug!("Loaded {} ({} lines)", path.display(), document.len());
    Ok(document)
}
