//! Page fetching with a single relaxed-header retry on 403.
//!
//! The first request goes out with a realistic browser User-Agent and
//! browser-like headers. A `403 Forbidden` triggers exactly one retry with
//! a well-known crawler identity and no extra headers; every other failure
//! ends the attempt so the caller can move on to its next candidate.

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::StatusCode;

use crate::config::FetchConfig;
use crate::error::SearchError;
use crate::http;
use crate::types::RawDocument;

/// Downloads a page body.
///
/// Implementations must be cancel-safe: dropping the returned future
/// aborts the in-flight request.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url`.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Denied`] for a non-success status (after the 403 retry)
    /// - [`SearchError::Timeout`] when the deadline elapses
    /// - [`SearchError::Http`] for any other transport failure
    async fn fetch(&self, url: &str) -> Result<RawDocument, SearchError>;
}

/// [`PageFetcher`] backed by `reqwest`.
pub struct HttpFetcher {
    client: reqwest::Client,
    retry_user_agent: String,
}

impl HttpFetcher {
    /// Build a fetcher from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` is invalid, or
    /// [`SearchError::Http`] if the client cannot be built.
    pub fn new(config: &FetchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let client = http::build_client(config.user_agent.as_deref(), config.timeout_seconds)?;
        Ok(Self {
            client,
            retry_user_agent: config.retry_user_agent.clone(),
        })
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, SearchError> {
        request
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest("page request failed", &e))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<RawDocument, SearchError> {
        tracing::debug!(url, "fetching page");

        let first = self
            .client
            .get(url)
            .header("Accept", http::ACCEPT_HTML)
            .header("Accept-Language", http::ACCEPT_LANGUAGE);
        let mut response = self.send(first).await?;

        if response.status() == StatusCode::FORBIDDEN {
            tracing::debug!(url, "403 received, retrying with crawler identity");
            let retry = self
                .client
                .get(url)
                .header(USER_AGENT, self.retry_user_agent.as_str());
            response = self.send(retry).await?;
        }

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url, status = status.as_u16(), "page fetch denied");
            return Err(SearchError::Denied {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::from_reqwest("page body read failed", &e))?;

        tracing::trace!(url, bytes = body.len(), "page received");
        Ok(RawDocument {
            url: url.to_owned(),
            status: status.as_u16(),
            body,
        })
    }
}
