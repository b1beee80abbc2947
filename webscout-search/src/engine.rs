//! Trait definition for pluggable search engine backends.
//!
//! Each search engine (DuckDuckGo, Bing, Startpage) implements
//! [`SearchBackend`] to provide a uniform interface for querying and
//! parsing results. The orchestrator holds backends as trait objects so
//! tests and callers can inject their own.

use async_trait::async_trait;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::SearchHit;

/// A pluggable search engine backend.
///
/// Implementors scrape a specific search engine's HTML response and extract
/// an ordered list of [`SearchHit`] values. Each engine handles its own:
///
/// - URL construction with query encoding
/// - HTTP request with a fixed browser User-Agent
/// - HTML parsing via a prioritised list of CSS selectors
/// - Dropping links to its own domain and to excluded domains
///
/// All implementations must be `Send + Sync` for concurrent engine queries.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Perform a web search and return parsed links, best first.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the HTTP request fails, times out, or the
    /// engine answers with a non-success status.
    async fn search(
        &self,
        query: &str,
        config: &SearchConfig,
    ) -> Result<Vec<SearchHit>, SearchError>;

    /// Human-readable backend name, used for logging and provenance.
    fn name(&self) -> &str;

    /// Search without surfacing errors.
    ///
    /// Any failure is logged and mapped to an empty list so the
    /// orchestrator can move on to the next engine.
    async fn search_best_effort(&self, query: &str, config: &SearchConfig) -> Vec<SearchHit> {
        match self.search(query, config).await {
            Ok(hits) => {
                if hits.is_empty() {
                    tracing::debug!(engine = self.name(), "engine returned no usable links");
                }
                hits
            }
            Err(err) => {
                tracing::warn!(engine = self.name(), error = %err, "engine query failed");
                Vec::new()
            }
        }
    }
}
