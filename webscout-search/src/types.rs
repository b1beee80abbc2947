//! Core types for search hits, ranked candidates and extracted content.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum number of characters a cleaned extraction must have to count
/// as usable content.
pub const MIN_CONTENT_LENGTH: usize = 100;

/// A raw link returned by a search engine, before ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// The result URL (redirect wrappers already removed).
    pub url: String,
    /// The link text shown by the engine.
    pub title: String,
}

/// Priority tier of the engine that discovered a candidate.
///
/// Ordering is significant: `Primary < Secondary < Tertiary`, and lower
/// tiers win score ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EngineTier {
    /// First engine in the configured order.
    Primary,
    /// Second engine in the configured order.
    Secondary,
    /// Third and later engines, and the topic fallback table.
    Tertiary,
}

impl EngineTier {
    /// Tier for the engine at `index` in the configured priority order.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Primary,
            1 => Self::Secondary,
            _ => Self::Tertiary,
        }
    }
}

/// A scored URL proposed as a possible information source for a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// The candidate URL.
    pub url: String,
    /// Link text from the engine, or the fallback table label.
    pub title: String,
    /// Tier of the engine that produced this candidate.
    pub engine: EngineTier,
    /// Name of the producing backend (`"topic-fallback"` for curated entries).
    pub backend: String,
    /// Domain trust score in `0..=100`.
    pub score: u8,
}

/// Search engines webscout-search knows how to scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchEngine {
    /// DuckDuckGo HTML endpoint: most scraper-friendly.
    DuckDuckGo,
    /// Bing: independent index, tolerant of plain GET requests.
    Bing,
    /// Startpage: proxied Google results.
    Startpage,
}

impl SearchEngine {
    /// Returns the human-readable name of this engine.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => "DuckDuckGo",
            Self::Bing => "Bing",
            Self::Startpage => "Startpage",
        }
    }

    /// Returns the registrable domain the engine serves its results from.
    ///
    /// Links pointing back at this domain are self-referential and dropped.
    pub fn home_domain(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => "duckduckgo.com",
            Self::Bing => "bing.com",
            Self::Startpage => "startpage.com",
        }
    }

    /// Returns all available engine variants in default priority order.
    pub fn all() -> &'static [SearchEngine] {
        &[Self::DuckDuckGo, Self::Bing, Self::Startpage]
    }
}

impl fmt::Display for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fetched document body, prior to extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    /// The URL that was requested.
    pub url: String,
    /// HTTP status of the final response.
    pub status: u16,
    /// The response body decoded as text.
    pub body: String,
}

/// Cleaned, boilerplate-free text extracted from a page.
///
/// Construction enforces `len() == text().chars().count()` and
/// `len() >= MIN_CONTENT_LENGTH`; shorter extractions never exist as
/// values of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedContent {
    text: String,
    source_url: String,
    length: usize,
}

impl ExtractedContent {
    /// Wrap extracted text, returning `None` when it is too short to use.
    pub fn new(text: impl Into<String>, source_url: impl Into<String>) -> Option<Self> {
        let text = text.into();
        let length = text.chars().count();
        if length < MIN_CONTENT_LENGTH {
            return None;
        }
        Some(Self {
            text,
            source_url: source_url.into(),
            length,
        })
    }

    /// The cleaned text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The URL the text was extracted from.
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Length of the text in characters.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns at most `max_chars` leading characters of the text.
    pub fn prefix(&self, max_chars: usize) -> &str {
        match self.text.char_indices().nth(max_chars) {
            Some((byte_idx, _)) => &self.text[..byte_idx],
            None => &self.text,
        }
    }
}
