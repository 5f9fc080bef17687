//! Phrase list parsing for rotating headlines.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// An ordered list of phrases derived from a comma-separated source string.
///
/// Parsing splits on the literal `,`, trims each segment, and drops segments
/// that trim to nothing. When no usable segment remains the list holds a
/// single empty phrase, so consumers never index into an empty list.
/// Embedded commas cannot be escaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseList {
    phrases: Vec<String>,
}

impl PhraseList {
    /// Parse a raw comma-separated string into a phrase list.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let phrases: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        if phrases.is_empty() {
            Self {
                phrases: vec![String::new()],
            }
        } else {
            Self { phrases }
        }
    }

    /// Number of phrases. Always at least 1.
    #[must_use]
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Always false; parsing inserts a placeholder phrase when needed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Whether the list is the single-empty-phrase placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.phrases.len() == 1 && self.phrases[0].is_empty()
    }

    /// Phrase at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.phrases.get(index).map(String::as_str)
    }

    /// First phrase. Safe because the list is never empty.
    #[must_use]
    pub fn first(&self) -> &str {
        self.phrases.first().map_or("", String::as_str)
    }

    /// Iterate over phrases in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }
}

impl Default for PhraseList {
    fn default() -> Self {
        Self::parse("")
    }
}

/// Number of grapheme clusters in `text`.
///
/// The engine types and deletes one user-visible character at a time, so all
/// prefix arithmetic counts graphemes, not bytes or `char`s.
#[must_use]
pub fn grapheme_len(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Prefix of `text` containing the first `count` grapheme clusters.
#[must_use]
pub fn grapheme_prefix(text: &str, count: usize) -> &str {
    match text.grapheme_indices(true).nth(count) {
        Some((offset, _)) => &text[..offset],
        None => text,
    }
}
