//! Startpage search engine: privacy-focused proxy for Google results.
//!
//! Startpage serves Google results without tracking. Uses a GET request
//! to `https://www.startpage.com/do/search` which returns clean HTML.
//! Tertiary by default: useful when the other engines block scraping.

use async_trait::async_trait;

use super::{extract_links, read_results_page, LinkFilter};
use crate::config::SearchConfig;
use crate::engine::SearchBackend;
use crate::error::SearchError;
use crate::http;
use crate::types::{SearchEngine, SearchHit};

/// Result-link selectors, most specific first.
const SELECTORS: &[&str] = &[
    ".w-gl__result a.w-gl__result-title",
    ".w-gl__result-title a",
    ".result a.result-link",
];

/// Startpage HTML search scraper.
pub struct StartpageEngine {
    endpoint: String,
}

impl StartpageEngine {
    /// Engine pointed at the public search endpoint.
    pub fn new() -> Self {
        Self::with_endpoint("https://www.startpage.com/do/search")
    }

    /// Engine pointed at a custom endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Default for StartpageEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchBackend for StartpageEngine {
    async fn search(
        &self,
        query: &str,
        config: &SearchConfig,
    ) -> Result<Vec<SearchHit>, SearchError> {
        tracing::trace!(query, "Startpage search");

        let client = http::build_client(config.user_agent.as_deref(), config.timeout_seconds)?;
        let request = client
            .get(&self.endpoint)
            .query(&[("q", query), ("cat", "web")]);
        let html = read_results_page(request, SearchEngine::Startpage).await?;

        parse_startpage_html(&html, config)
    }

    fn name(&self) -> &str {
        SearchEngine::Startpage.name()
    }
}

/// Parse a Startpage HTML response into result links.
pub(crate) fn parse_startpage_html(
    html: &str,
    config: &SearchConfig,
) -> Result<Vec<SearchHit>, SearchError> {
    let filter = LinkFilter::new(SearchEngine::Startpage, config);
    let hits = extract_links(
        html,
        SELECTORS,
        |href| Some(href.to_string()),
        &filter,
        config.max_results_per_engine,
    )?;
    tracing::debug!(count = hits.len(), "Startpage results parsed");
    Ok(hits)
}
