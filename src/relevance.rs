//! Lexical relevance gate.
//!
//! A coarse check that rejects off-topic pages before a summarizer call is
//! spent on them. Not semantic matching.

/// Tokens this short or shorter are ignored.
const MIN_TOKEN_CHARS: usize = 2;

/// Query-token overlap judge.
#[derive(Debug, Clone, Copy)]
pub struct RelevanceJudge {
    min_ratio: f64,
}

impl RelevanceJudge {
    /// Judge requiring at least `min_ratio` of query tokens to occur in the text.
    pub fn new(min_ratio: f64) -> Self {
        Self { min_ratio }
    }

    /// Fraction of significant query tokens found in `text`.
    ///
    /// Returns `None` when the query has no token longer than two characters.
    pub fn overlap(&self, text: &str, query: &str) -> Option<f64> {
        let tokens = significant_tokens(query);
        if tokens.is_empty() {
            return None;
        }
        let haystack = text.to_lowercase();
        let found = tokens.iter().filter(|t| haystack.contains(t.as_str())).count();
        Some(found as f64 / tokens.len() as f64)
    }

    /// `true` when the overlap is at least the configured ratio.
    ///
    /// A query with no significant tokens gives the gate nothing to test,
    /// so every text passes.
    pub fn is_relevant(&self, text: &str, query: &str) -> bool {
        self.overlap(text, query)
            .is_none_or(|ratio| ratio >= self.min_ratio)
    }
}

impl Default for RelevanceJudge {
    fn default() -> Self {
        Self::new(0.3)
    }
}

/// Lowercased whitespace tokens, edge punctuation stripped, longer than two chars.
fn significant_tokens(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| c.is_ascii_punctuation()).to_lowercase())
        .filter(|t| t.chars().count() > MIN_TOKEN_CHARS)
        .collect()
}
