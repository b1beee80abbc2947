//! Bing search engine: secondary by default, Microsoft's index.
//!
//! Bing sometimes wraps result links in `bing.com/ck/a` click-tracking
//! redirects whose `u` parameter carries a base64-encoded target URL;
//! those are unwrapped during parsing.

use async_trait::async_trait;
use base64::Engine as _;
use url::Url;

use super::{extract_links, read_results_page, LinkFilter};
use crate::config::SearchConfig;
use crate::engine::SearchBackend;
use crate::error::SearchError;
use crate::http;
use crate::types::{SearchEngine, SearchHit};

/// Result-link selectors, most specific first.
const SELECTORS: &[&str] = &["li.b_algo h2 a", "#b_results .b_title a", "#b_results h2 a"];

/// Bing HTML search scraper.
pub struct BingEngine {
    endpoint: String,
}

impl BingEngine {
    /// Engine pointed at the public search endpoint.
    pub fn new() -> Self {
        Self::with_endpoint("https://www.bing.com/search")
    }

    /// Engine pointed at a custom endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// Resolve a result `href`, decoding `/ck/a?u=a1<base64>` redirects.
    fn extract_url(href: &str) -> Option<String> {
        let parsed = Url::parse(href).ok()?;
        let is_redirect = parsed
            .host_str()
            .is_some_and(|h| h == "bing.com" || h.ends_with(".bing.com"))
            && parsed.path().starts_with("/ck/a");
        if !is_redirect {
            return Some(href.to_string());
        }

        let encoded = parsed
            .query_pairs()
            .find(|(key, _)| key == "u")
            .map(|(_, value)| value.into_owned())?;
        let payload = encoded.strip_prefix("a1").unwrap_or(&encoded);
        let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .ok()?;
        String::from_utf8(bytes).ok()
    }
}

impl Default for BingEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchBackend for BingEngine {
    async fn search(
        &self,
        query: &str,
        config: &SearchConfig,
    ) -> Result<Vec<SearchHit>, SearchError> {
        tracing::trace!(query, "Bing search");

        let client = http::build_client(config.user_agent.as_deref(), config.timeout_seconds)?;
        let request = client
            .get(&self.endpoint)
            .query(&[("q", query), ("setlang", "en")]);
        let html = read_results_page(request, SearchEngine::Bing).await?;

        parse_bing_html(&html, config)
    }

    fn name(&self) -> &str {
        SearchEngine::Bing.name()
    }
}

/// Parse a Bing HTML response into result links.
fn parse_bing_html(html: &str, config: &SearchConfig) -> Result<Vec<SearchHit>, SearchError> {
    let filter = LinkFilter::new(SearchEngine::Bing, config);
    let hits = extract_links(
        html,
        SELECTORS,
        BingEngine::extract_url,
        &filter,
        config.max_results_per_engine,
    )?;
    tracing::debug!(count = hits.len(), "Bing results parsed");
    Ok(hits)
}
