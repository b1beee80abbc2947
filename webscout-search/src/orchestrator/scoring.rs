//! Domain trust scoring for candidate URLs.
//!
//! Assigns each URL an integer score in `0..=100` from an injected,
//! immutable [`DomainTable`]:
//!
//! ```text
//! score = max(weight for every pattern contained in the URL)   (0 if none)
//! score = score - blacklist_penalty   if any blacklist pattern matches (floored at 0)
//! ```
//!
//! Matching is a case-insensitive substring test against the whole URL.

use serde::{Deserialize, Serialize};

/// A `(substring, weight)` entry of the domain table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainWeight {
    /// Substring looked for in the URL, e.g. `".ac.in"`.
    pub pattern: String,
    /// Trust weight in `0..=100`.
    pub weight: u8,
}

impl DomainWeight {
    /// Weight `weight` for URLs containing `pattern`.
    pub fn new(pattern: &str, weight: u8) -> Self {
        Self {
            pattern: pattern.to_owned(),
            weight,
        }
    }
}

/// Static weighted-domain table plus blacklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainTable {
    /// Weighted patterns; order only matters for readability.
    pub weights: Vec<DomainWeight>,
    /// Patterns for known-problematic domains.
    pub blacklist: Vec<String>,
    /// Amount subtracted when a blacklist pattern matches.
    pub blacklist_penalty: u8,
}

impl Default for DomainTable {
    fn default() -> Self {
        Self {
            weights: vec![
                // Government and academic.
                DomainWeight::new(".gov.in", 100),
                DomainWeight::new(".nic.in", 95),
                DomainWeight::new(".gov", 95),
                DomainWeight::new(".ac.in", 90),
                DomainWeight::new(".edu.in", 90),
                DomainWeight::new(".edu", 90),
                DomainWeight::new(".ac.uk", 85),
                // Curated reference and educational portals.
                DomainWeight::new("wikipedia.org", 75),
                DomainWeight::new("nirfindia.org", 75),
                DomainWeight::new("britannica.com", 65),
                DomainWeight::new("shiksha.com", 60),
                DomainWeight::new("careers360.com", 60),
                DomainWeight::new("collegedunia.com", 50),
                // Generic TLDs.
                DomainWeight::new(".org", 40),
                DomainWeight::new(".in", 35),
                DomainWeight::new(".com", 30),
                DomainWeight::new(".net", 30),
            ],
            blacklist: vec![
                "pinterest.".into(),
                "quora.com".into(),
                "scribd.com".into(),
                "slideshare.net".into(),
            ],
            blacklist_penalty: 50,
        }
    }
}

/// Pure URL → trust score function over an injected [`DomainTable`].
///
/// Deterministic, no I/O, no failure mode. Patterns are lowercased once
/// at construction.
#[derive(Debug, Clone)]
pub struct DomainScorer {
    weights: Vec<(String, u8)>,
    blacklist: Vec<String>,
    penalty: u8,
}

impl DomainScorer {
    /// Build a scorer over `table`.
    pub fn new(table: &DomainTable) -> Self {
        Self {
            weights: table
                .weights
                .iter()
                .filter(|w| !w.pattern.is_empty())
                .map(|w| (w.pattern.to_lowercase(), w.weight.min(100)))
                .collect(),
            blacklist: table
                .blacklist
                .iter()
                .filter(|p| !p.is_empty())
                .map(|p| p.to_lowercase())
                .collect(),
            penalty: table.blacklist_penalty,
        }
    }

    /// Score `url` in `0..=100`.
    pub fn score(&self, url: &str) -> u8 {
        let url = url.to_lowercase();
        let base = self
            .weights
            .iter()
            .filter(|(pattern, _)| url.contains(pattern.as_str()))
            .map(|(_, weight)| *weight)
            .max()
            .unwrap_or(0);

        if self.blacklist.iter().any(|p| url.contains(p.as_str())) {
            base.saturating_sub(self.penalty)
        } else {
            base
        }
    }
}

impl Default for DomainScorer {
    fn default() -> Self {
        Self::new(&DomainTable::default())
    }
}
