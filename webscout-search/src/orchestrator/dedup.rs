//! Merging of per-engine hit lists into one candidate list.
//!
//! Engine lists are consumed in priority order and deduplicated by exact
//! URL: the first occurrence wins, so a URL found by several engines keeps
//! the highest-priority tier and its earliest discovery position.

use std::collections::HashSet;

use crate::types::{Candidate, EngineTier, SearchHit};

/// Hits returned by one engine, tagged with its tier and name.
#[derive(Debug, Clone)]
pub struct EngineHits {
    /// Tier of the producing engine.
    pub tier: EngineTier,
    /// Backend name recorded on every candidate.
    pub backend: String,
    /// Hits in engine order.
    pub hits: Vec<SearchHit>,
}

/// Merge engine hit lists into unscored candidates, dropping repeated URLs.
///
/// The input must already be in priority order; the output preserves
/// that order followed by discovery order within each engine.
pub fn deduplicate(lists: Vec<EngineHits>) -> Vec<Candidate> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut candidates = Vec::new();

    for list in lists {
        for hit in list.hits {
            if !seen.insert(hit.url.clone()) {
                continue;
            }
            candidates.push(Candidate {
                url: hit.url,
                title: hit.title,
                engine: list.tier,
                backend: list.backend.clone(),
                score: 0,
            });
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_hits(tier: EngineTier, backend: &str, urls: &[&str]) -> EngineHits {
        EngineHits {
            tier,
            backend: backend.into(),
            hits: urls
                .iter()
                .map(|u| SearchHit {
                    url: (*u).into(),
                    title: format!("Title for {u}"),
                })
                .collect(),
        }
    }

    #[test]
    fn exact_duplicates_keep_first_occurrence() {
        let candidates = deduplicate(vec![
            engine_hits(EngineTier::Primary, "DuckDuckGo", &["https://a.com", "https://b.com"]),
            engine_hits(EngineTier::Secondary, "Bing", &["https://b.com", "https://c.com"]),
        ]);
        let urls: Vec<&str> = candidates.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(urls, vec!["https://a.com", "https://b.com", "https://c.com"]);
        assert_eq!(candidates[1].engine, EngineTier::Primary);
        assert_eq!(candidates[1].backend, "DuckDuckGo");
        assert_eq!(candidates[2].engine, EngineTier::Secondary);
    }

    #[test]
    fn near_duplicates_are_distinct() {
        let candidates = deduplicate(vec![engine_hits(
            EngineTier::Primary,
            "DuckDuckGo",
            &["https://a.com/", "https://a.com", "https://A.com/"],
        )]);
        assert_eq!(candidates.len(), 3);
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(deduplicate(vec![]).is_empty());
        assert!(deduplicate(vec![engine_hits(EngineTier::Primary, "Bing", &[])]).is_empty());
    }

    #[test]
    fn candidates_start_unscored() {
        let candidates = deduplicate(vec![engine_hits(
            EngineTier::Tertiary,
            "Startpage",
            &["https://www.iitb.ac.in/"],
        )]);
        assert_eq!(candidates[0].score, 0);
        assert_eq!(candidates[0].title, "Title for https://www.iitb.ac.in/");
    }
}
