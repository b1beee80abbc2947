//! Search, fetch and extraction configuration with sensible defaults.
//!
//! [`SearchConfig`] controls which engines are queried and how their
//! results are merged, [`FetchConfig`] controls page downloads, and
//! [`ExtractConfig`] the content extractor thresholds. The defaults are
//! tuned for reliable, polite scraping.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::types::{SearchEngine, MIN_CONTENT_LENGTH};

/// How the orchestrator combines engine results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveStrategy {
    /// Query engines in priority order and stop at the first non-empty list.
    FirstNonEmpty,
    /// Query every engine concurrently and merge all results.
    #[default]
    MergeAll,
}

/// Configuration for resolving a query to candidate URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Engines in priority order: primary, secondary, tertiary.
    pub engines: Vec<SearchEngine>,
    /// How many links to keep from each engine.
    pub max_results_per_engine: usize,
    /// Per-engine HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// Whether engine results are short-circuited or merged.
    pub strategy: ResolveStrategy,
    /// Domains never proposed as candidates (video platforms, social feeds).
    pub excluded_domains: Vec<String>,
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            engines: SearchEngine::all().to_vec(),
            max_results_per_engine: 8,
            timeout_seconds: 15,
            strategy: ResolveStrategy::default(),
            excluded_domains: vec![
                "youtube.com".into(),
                "youtu.be".into(),
                "vimeo.com".into(),
                "tiktok.com".into(),
                "facebook.com".into(),
                "instagram.com".into(),
            ],
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_results_per_engine == 0 {
            return Err(SearchError::Config(
                "max_results_per_engine must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "search timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.engines.is_empty() {
            return Err(SearchError::Config(
                "at least one engine must be enabled".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration for downloading candidate pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Hard deadline for a single page request in seconds.
    pub timeout_seconds: u64,
    /// Browser identity for the first attempt. Rotates when `None`.
    pub user_agent: Option<String>,
    /// Minimal identity used for the single retry after a 403.
    pub retry_user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 15,
            user_agent: None,
            retry_user_agent:
                "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)".into(),
        }
    }
}

impl FetchConfig {
    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "fetch timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.retry_user_agent.trim().is_empty() {
            return Err(SearchError::Config(
                "retry_user_agent must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Thresholds for the content extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// A content selector is accepted once its text exceeds this many characters.
    pub accept_threshold: usize,
    /// Extracted text is truncated to this many characters.
    pub max_chars: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            accept_threshold: 200,
            max_chars: 100_000,
        }
    }
}

impl ExtractConfig {
    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_chars < MIN_CONTENT_LENGTH {
            return Err(SearchError::Config(format!(
                "extract max_chars must be at least {MIN_CONTENT_LENGTH}"
            )));
        }
        if self.accept_threshold > self.max_chars {
            return Err(SearchError::Config(
                "extract accept_threshold must be <= max_chars".into(),
            ));
        }
        Ok(())
    }
}
