//! Tokenizer — splits raw text into maximal alphanumeric runs, then lowercases each run.
//!
//! Segmentation is language-agnostic: any character Unicode classifies as a
//! letter or digit extends the current token, everything else (whitespace,
//! punctuation, symbols) ends it and is dropped. No stemming, no stop words.

use tracing::{debug, warn};

/// Which tokens survive segmentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TokenFilter {
    /// Letters and/or digits. Standalone numbers such as "2024" are kept.
    #[default]
    Alphanumeric,
    /// Letters only. Any token containing a digit is dropped.
    Alphabetic,
}

impl TokenFilter {
    fn keeps(self, token: &str) -> bool {
        match self {
            TokenFilter::Alphanumeric => true,
            TokenFilter::Alphabetic => token.chars().all(char::is_alphabetic),
        }
    }
}

/// Built once at startup and shared by reference with every component that
/// needs to segment text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer {
    filter: TokenFilter,
}

impl Tokenizer {
    pub fn new(filter: TokenFilter) -> Self {
        Self { filter }
    }

    /// Tokenizer used by corpus analysis: numbers are not words there.
    pub fn alphabetic() -> Self {
        Self::new(TokenFilter::Alphabetic)
    }

    /// Returns the ordered, lowercased tokens of `text`.
    /// Empty or whitespace-only input yields an empty sequence.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            warn!("Empty or whitespace-only text provided for tokenization");
            return Vec::new();
        }

        // Lowercasing can emit combining marks (`İ` -> `i\u{307}`), so split first.
        let tokens: Vec<String> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty() && self.filter.keeps(t))
            .map(str::to_lowercase)
            .collect();

        debug!("Tokenized {} chars into {} tokens", text.len(), tokens.len());
        if tokens.is_empty() {
            warn!("No tokens remaining after tokenization");
        }
        tokens
    }
}
