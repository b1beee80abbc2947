//! Search engine implementations.
//!
//! Each module provides a struct implementing [`crate::engine::SearchBackend`]
//! that scrapes a specific search engine's HTML results page. The shared
//! helpers here run an engine's prioritised selector list and filter the
//! resulting links.

pub mod bing;
pub mod duckduckgo;
pub mod startpage;

pub use bing::BingEngine;
pub use duckduckgo::DuckDuckGoEngine;
pub use startpage::StartpageEngine;

use scraper::{Html, Selector};
use url::Url;

use crate::config::SearchConfig;
use crate::engine::SearchBackend;
use crate::error::SearchError;
use crate::types::{SearchEngine, SearchHit};

/// Instantiate the concrete backend for `engine` with its public endpoint.
pub fn backend_for(engine: SearchEngine) -> Box<dyn SearchBackend> {
    match engine {
        SearchEngine::DuckDuckGo => Box::new(DuckDuckGoEngine::new()),
        SearchEngine::Bing => Box::new(BingEngine::new()),
        SearchEngine::Startpage => Box::new(StartpageEngine::new()),
    }
}

/// Domains a link must not point at.
pub(crate) struct LinkFilter<'a> {
    /// The engine's own domain.
    pub home_domain: &'a str,
    /// Configured exclusions (video platforms and the like).
    pub excluded: &'a [String],
}

impl<'a> LinkFilter<'a> {
    pub(crate) fn new(engine: SearchEngine, config: &'a SearchConfig) -> Self {
        Self {
            home_domain: engine.home_domain(),
            excluded: &config.excluded_domains,
        }
    }

    /// Returns `true` if `url` is an http(s) link to an allowed host.
    pub(crate) fn accepts(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        if !matches!(parsed.scheme(), "http" | "https") {
            return false;
        }
        let Some(host) = parsed.host_str() else {
            return false;
        };
        let host = host.to_ascii_lowercase();
        !host_matches(&host, self.home_domain)
            && !self.excluded.iter().any(|d| host_matches(&host, d))
    }
}

/// `host` equals `domain` or is a subdomain of it.
fn host_matches(host: &str, domain: &str) -> bool {
    let domain = domain.trim_start_matches('.').to_ascii_lowercase();
    host == domain || host.ends_with(&format!(".{domain}"))
}

/// Run a prioritised selector list over a results page.
///
/// Each selector must match anchor elements. Selector 1 is tried first;
/// only when it yields no acceptable links is selector 2 tried, and so on.
/// `resolve` turns a raw `href` into the final URL (unwrapping redirect
/// wrappers) or rejects it.
pub(crate) fn extract_links<F>(
    html: &str,
    selectors: &[&str],
    resolve: F,
    filter: &LinkFilter<'_>,
    max_results: usize,
) -> Result<Vec<SearchHit>, SearchError>
where
    F: Fn(&str) -> Option<String>,
{
    let document = Html::parse_document(html);

    for (index, selector_str) in selectors.iter().enumerate() {
        let selector = Selector::parse(selector_str)
            .map_err(|e| SearchError::Parse(format!("invalid selector {selector_str}: {e:?}")))?;

        let mut hits: Vec<SearchHit> = Vec::new();
        for anchor in document.select(&selector) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let Some(url) = resolve(href.trim()) else {
                continue;
            };
            if !filter.accepts(&url) || hits.iter().any(|h| h.url == url) {
                continue;
            }
            let title = anchor
                .text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            hits.push(SearchHit { url, title });
            if hits.len() >= max_results {
                break;
            }
        }

        if !hits.is_empty() {
            tracing::debug!(selector = index, count = hits.len(), "links extracted");
            return Ok(hits);
        }
    }

    Ok(Vec::new())
}

/// Send an engine request and read the body, mapping failures to [`SearchError`].
pub(crate) async fn read_results_page(
    request: reqwest::RequestBuilder,
    engine: SearchEngine,
) -> Result<String, SearchError> {
    let response = request
        .header("Accept", crate::http::ACCEPT_HTML)
        .header("Accept-Language", crate::http::ACCEPT_LANGUAGE)
        .send()
        .await
        .map_err(|e| SearchError::from_reqwest(&format!("{engine} request failed"), &e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SearchError::Denied {
            status: status.as_u16(),
        });
    }

    let html = response
        .text()
        .await
        .map_err(|e| SearchError::from_reqwest(&format!("{engine} response read failed"), &e))?;

    tracing::trace!(%engine, bytes = html.len(), "results page received");
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter_for(excluded: &[String]) -> LinkFilter<'_> {
        LinkFilter {
            home_domain: "engine.test",
            excluded,
        }
    }

    #[test]
    fn filter_rejects_self_and_excluded_domains() {
        let excluded = vec!["youtube.com".to_string()];
        let filter = filter_for(&excluded);
        assert!(filter.accepts("https://example.com/page"));
        assert!(!filter.accepts("https://engine.test/settings"));
        assert!(!filter.accepts("https://help.engine.test/"));
        assert!(!filter.accepts("https://www.youtube.com/watch?v=1"));
        assert!(!filter.accepts("javascript:void(0)"));
        assert!(!filter.accepts("/relative/path"));
    }

    #[test]
    fn filter_does_not_match_domain_suffix_without_dot() {
        let excluded = vec!["tube.com".to_string()];
        let filter = filter_for(&excluded);
        assert!(filter.accepts("https://youtube.com/"));
    }

    #[test]
    fn falls_through_to_second_selector() {
        let html = r#"<html><body>
            <div class="other"><a href="https://a.example.org/">A</a></div>
            <div class="other"><a href="https://b.example.org/">B</a></div>
        </body></html>"#;
        let excluded = vec![];
        let hits = extract_links(
            html,
            &["div.primary a", "div.other a"],
            |h| Some(h.to_string()),
            &filter_for(&excluded),
            10,
        )
        .expect("should parse");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].url, "https://a.example.org/");
        assert_eq!(hits[1].title, "B");
    }

    #[test]
    fn filtered_out_links_fall_through_to_next_selector() {
        let html = r#"<html><body>
            <div class="primary"><a href="https://engine.test/more">More</a></div>
            <div class="other"><a href="https://c.example.org/">C</a></div>
        </body></html>"#;
        let excluded = vec![];
        let hits = extract_links(
            html,
            &["div.primary a", "div.other a"],
            |h| Some(h.to_string()),
            &filter_for(&excluded),
            10,
        )
        .expect("should parse");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].url, "https://c.example.org/");
    }

    #[test]
    fn duplicate_links_collapse_and_limit_applies() {
        let html = r#"<html><body>
            <a class="r" href="https://x.example.org/">X</a>
            <a class="r" href="https://x.example.org/">X again</a>
            <a class="r" href="https://y.example.org/">Y</a>
            <a class="r" href="https://z.example.org/">Z</a>
        </body></html>"#;
        let excluded = vec![];
        let hits = extract_links(
            html,
            &["a.r"],
            |h| Some(h.to_string()),
            &filter_for(&excluded),
            2,
        )
        .expect("should parse");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[1].url, "https://y.example.org/");
    }

    #[test]
    fn no_matches_returns_empty() {
        let excluded = vec![];
        let hits = extract_links(
            "<html><body></body></html>",
            &["a.r"],
            |h| Some(h.to_string()),
            &filter_for(&excluded),
            10,
        )
        .expect("should parse");
        assert!(hits.is_empty());
    }

    #[test]
    fn invalid_selector_is_parse_error() {
        let excluded = vec![];
        let err = extract_links(
            "<html></html>",
            &["a[["],
            |h| Some(h.to_string()),
            &filter_for(&excluded),
            10,
        )
        .unwrap_err();
        assert!(err.to_string().contains("parse error"));
    }

    #[test]
    fn backend_for_names_match_engines() {
        for engine in SearchEngine::all() {
            assert_eq!(backend_for(*engine).name(), engine.name());
        }
    }
}
