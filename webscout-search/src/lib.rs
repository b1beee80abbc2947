//! # webscout-search
//!
//! Source discovery for webscout: find, fetch and clean web pages.
//!
//! This crate scrapes public search engines directly (no API keys), ranks
//! the returned links by how trustworthy their domain looks, downloads
//! pages with a crawler-identity retry on `403`, and strips boilerplate
//! down to readable text.
//!
//! ## Design
//!
//! - Scrapes DuckDuckGo, Bing and Startpage using CSS selectors on HTML responses
//! - Engines are tried sequentially or concurrently and merged, per [`ResolveStrategy`]
//! - Candidates are scored against an injected [`DomainTable`]
//! - Engine failures degrade to empty result lists, never to errors
//! - [`SearchBackend`] and [`PageFetcher`] are traits so callers can inject doubles
//!
//! ## Security
//!
//! - No API keys or secrets to leak
//! - No network listeners: this is a library, not a server
//! - Search queries are logged only at trace level

pub mod config;
pub mod content;
pub mod engine;
pub mod engines;
pub mod error;
pub mod fetch;
pub mod http;
pub mod orchestrator;
pub mod types;

pub use config::{ExtractConfig, FetchConfig, ResolveStrategy, SearchConfig};
pub use content::ContentExtractor;
pub use engine::SearchBackend;
pub use error::{Result, SearchError};
pub use fetch::{HttpFetcher, PageFetcher};
pub use orchestrator::{DomainScorer, DomainTable, SearchOrchestrator, TopicFallbacks};
pub use types::{Candidate, EngineTier, ExtractedContent, RawDocument, SearchEngine, SearchHit};

/// Resolve a query to ranked candidates using the public engines in `config`.
///
/// Uses the built-in [`DomainTable`] and [`TopicFallbacks`].
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid. Engine failures
/// are not errors; they only shrink the candidate list.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> webscout_search::Result<()> {
/// let config = webscout_search::SearchConfig::default();
/// let candidates = webscout_search::search("IIT Bombay", &config).await?;
/// for candidate in &candidates {
///     println!("{:>3} {}", candidate.score, candidate.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(query: &str, config: &SearchConfig) -> Result<Vec<Candidate>> {
    let orchestrator = SearchOrchestrator::from_config(
        config.clone(),
        &DomainTable::default(),
        TopicFallbacks::default(),
    )?;
    Ok(orchestrator.resolve(query).await)
}

/// Fetch a page and extract its readable text with default settings.
///
/// Returns `Ok(None)` when the page downloads but holds too little text.
///
/// # Errors
///
/// Returns [`SearchError::Denied`], [`SearchError::Timeout`] or
/// [`SearchError::Http`] if the page cannot be fetched.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> webscout_search::Result<()> {
/// if let Some(page) = webscout_search::fetch_page_content("https://example.com").await? {
///     println!("{} chars from {}", page.len(), page.source_url());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn fetch_page_content(url: &str) -> Result<Option<ExtractedContent>> {
    let fetcher = HttpFetcher::new(&FetchConfig::default())?;
    let document = fetcher.fetch(url).await?;
    Ok(ContentExtractor::default().extract(&document))
}
