//! DuckDuckGo search engine: most scraper-friendly, primary by default.
//!
//! Uses the HTML-only version at `https://html.duckduckgo.com/html/`
//! which requires no JavaScript and is tolerant of automated requests.

use async_trait::async_trait;
use url::Url;

use super::{extract_links, read_results_page, LinkFilter};
use crate::config::SearchConfig;
use crate::engine::SearchBackend;
use crate::error::SearchError;
use crate::http;
use crate::types::{SearchEngine, SearchHit};

/// Result-link selectors, most specific first.
const SELECTORS: &[&str] = &[
    ".result:not(.result--ad) a.result__a",
    ".web-result a.result__url",
    ".links_main a[href]",
];

/// DuckDuckGo HTML search engine scraper.
///
/// Uses a POST request to the HTML-only endpoint which requires no
/// JavaScript.
pub struct DuckDuckGoEngine {
    endpoint: String,
}

impl DuckDuckGoEngine {
    /// Engine pointed at the public HTML endpoint.
    pub fn new() -> Self {
        Self::with_endpoint("https://html.duckduckgo.com/html/")
    }

    /// Engine pointed at a custom endpoint (mirrors, test servers).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// Extract the actual URL from DuckDuckGo's redirect wrapper.
    ///
    /// DDG wraps URLs like: `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`
    /// We parse out the `uddg` query parameter and URL-decode it.
    fn extract_url(href: &str) -> Option<String> {
        let full_href = if href.starts_with("//") {
            format!("https:{href}")
        } else {
            href.to_string()
        };

        let parsed = Url::parse(&full_href).ok()?;

        if parsed.host_str() == Some("duckduckgo.com") && parsed.path().starts_with("/l/") {
            parsed
                .query_pairs()
                .find(|(key, _)| key == "uddg")
                .map(|(_, value)| value.into_owned())
        } else {
            Some(full_href)
        }
    }
}

impl Default for DuckDuckGoEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchBackend for DuckDuckGoEngine {
    async fn search(
        &self,
        query: &str,
        config: &SearchConfig,
    ) -> Result<Vec<SearchHit>, SearchError> {
        tracing::trace!(query, "DuckDuckGo search");

        let client = http::build_client(config.user_agent.as_deref(), config.timeout_seconds)?;
        let request = client.post(&self.endpoint).form(&[("q", query), ("kl", "us-en")]);
        let html = read_results_page(request, SearchEngine::DuckDuckGo).await?;

        parse_duckduckgo_html(&html, config)
    }

    fn name(&self) -> &str {
        SearchEngine::DuckDuckGo.name()
    }
}

/// Parse a DuckDuckGo HTML response into result links.
pub(crate) fn parse_duckduckgo_html(
    html: &str,
    config: &SearchConfig,
) -> Result<Vec<SearchHit>, SearchError> {
    let filter = LinkFilter::new(SearchEngine::DuckDuckGo, config);
    let hits = extract_links(
        html,
        SELECTORS,
        DuckDuckGoEngine::extract_url,
        &filter,
        config.max_results_per_engine,
    )?;
    tracing::debug!(count = hits.len(), "DuckDuckGo results parsed");
    Ok(hits)
}
