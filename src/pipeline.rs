//! Research pipeline controller.
//!
//! ```text
//! ClassifyInput ─┬─ DirectFetch ──────────────────────┐
//!                └─ SearchResolve ─ ExtractLoop ─ Relevance ─┴─ Summarize ─ Assemble
//! ```
//!
//! Every path ends in a [`PipelineResult`]; nothing escapes as an error.
//! The candidate loop is strictly sequential and bounded by
//! `pipeline.max_attempts`. Cancellation drops the in-flight stage, which
//! aborts any outstanding HTTP request.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use url::Url;
use webscout_search::{
    Candidate, ContentExtractor, ExtractConfig, ExtractedContent, HttpFetcher, PageFetcher,
    SearchError, SearchOrchestrator,
};

use crate::answer;
use crate::config::{PipelineConfig, ResearchConfig};
use crate::error::Result;
use crate::relevance::RelevanceJudge;
use crate::summarizer::{ChatCompletionsSummarizer, Summarizer};

/// Source of "now" for answer timestamps.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Classified pipeline input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// An absolute `http`/`https` URL, fetched directly.
    DirectUrl(Url),
    /// Anything else, resolved through search.
    FreeText(String),
}

impl Query {
    /// Classify raw input. Returns `None` for empty or whitespace-only input.
    ///
    /// Only absolute `http`/`https` URLs with a host are fetched directly.
    /// Other schemes (`ftp:`, `file:`, `mailto:`) are searched as text.
    pub fn classify(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        match Url::parse(input) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => {
                Some(Self::DirectUrl(url))
            }
            _ => Some(Self::FreeText(input.to_owned())),
        }
    }

    /// The text handed to the summarizer.
    fn as_text(&self) -> &str {
        match self {
            Self::DirectUrl(url) => url.as_str(),
            Self::FreeText(text) => text,
        }
    }
}

/// Why a request produced no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Empty or missing input.
    InvalidInput,
    /// Search found nothing, or every candidate failed.
    NoSourceFound,
    /// A directly supplied URL could not be read.
    FetchDenied,
    /// The caller cancelled the request.
    Cancelled,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidInput => "invalid input",
            Self::NoSourceFound => "no source found",
            Self::FetchDenied => "fetch denied",
            Self::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

/// Terminal value of a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PipelineResult {
    /// An answer was assembled.
    Success {
        /// Summary or excerpt, followed by source and metadata lines.
        answer: String,
        /// Page the answer came from; `None` for general-knowledge answers.
        source_url: Option<String>,
        /// Whether the summarizer produced the body.
        used_summarizer: bool,
        /// Characters of extracted content (0 without a source).
        content_length: usize,
        /// When the answer was assembled.
        retrieved_at: DateTime<Utc>,
    },
    /// No answer; `message` explains why and what to try next.
    Failure {
        /// Failure category.
        reason: FailureReason,
        /// Human-readable explanation.
        message: String,
    },
}

impl PipelineResult {
    fn failure(reason: FailureReason, message: impl Into<String>) -> Self {
        Self::Failure {
            reason,
            message: message.into(),
        }
    }

    /// `true` for [`PipelineResult::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The failure reason, if any.
    pub fn failure_reason(&self) -> Option<FailureReason> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { reason, .. } => Some(*reason),
        }
    }
}

/// Why a single candidate was skipped.
#[derive(Debug)]
enum AttemptFailure {
    Fetch(SearchError),
    NoContent,
    Irrelevant,
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(e) => write!(f, "{e}"),
            Self::NoContent => f.write_str("no readable content"),
            Self::Irrelevant => f.write_str("content not relevant to the query"),
        }
    }
}

/// Composes search, fetch, extraction, relevance and summarization.
///
/// Holds no per-request state; one instance can serve concurrent runs.
pub struct ResearchPipeline {
    orchestrator: SearchOrchestrator,
    fetcher: Arc<dyn PageFetcher>,
    extractor: ContentExtractor,
    judge: RelevanceJudge,
    summarizer: Option<Arc<dyn Summarizer>>,
    config: PipelineConfig,
    clock: Clock,
}

impl ResearchPipeline {
    /// Assemble a pipeline from parts. No summarizer, wall-clock time.
    pub fn new(
        orchestrator: SearchOrchestrator,
        fetcher: Arc<dyn PageFetcher>,
        extract: ExtractConfig,
        config: PipelineConfig,
    ) -> Self {
        Self {
            orchestrator,
            fetcher,
            extractor: ContentExtractor::new(extract),
            judge: RelevanceJudge::new(config.relevance_ratio),
            summarizer: None,
            config,
            clock: Arc::new(Utc::now),
        }
    }

    /// Build a live pipeline: public engines, HTTP fetcher, and a
    /// chat-completions summarizer when a key is available.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid or a client cannot be built.
    pub fn from_config(config: &ResearchConfig) -> Result<Self> {
        config.validate()?;
        let orchestrator = SearchOrchestrator::from_config(
            config.search.clone(),
            &config.domains,
            config.fallbacks.clone(),
        )?;
        let fetcher = Arc::new(HttpFetcher::new(&config.fetch)?);
        let mut pipeline = Self::new(
            orchestrator,
            fetcher,
            config.extract.clone(),
            config.pipeline.clone(),
        );
        if let Some(summarizer) = ChatCompletionsSummarizer::from_config(&config.summarizer)? {
            pipeline = pipeline.with_summarizer(Arc::new(summarizer));
        }
        Ok(pipeline)
    }

    /// Attach a summarizer.
    pub fn with_summarizer(mut self, summarizer: Arc<dyn Summarizer>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    /// Replace the clock used for `retrieved_at`.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Run one request to completion.
    pub async fn run(&self, input: &str) -> PipelineResult {
        self.run_with_cancel(input, &CancellationToken::new()).await
    }

    /// Run one request, aborting in-flight work when `cancel` fires.
    pub async fn run_with_cancel(&self, input: &str, cancel: &CancellationToken) -> PipelineResult {
        let Some(query) = Query::classify(input) else {
            return PipelineResult::failure(
                FailureReason::InvalidInput,
                "Please enter a question, topic or URL.",
            );
        };

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::info!("request cancelled");
                PipelineResult::failure(FailureReason::Cancelled, "The request was cancelled.")
            }
            result = self.process(&query) => result,
        }
    }

    async fn process(&self, query: &Query) -> PipelineResult {
        match query {
            Query::DirectUrl(url) => self.direct_fetch(query, url).await,
            Query::FreeText(text) => self.search_resolve(query, text).await,
        }
    }

    /// Direct URLs skip the relevance gate: the user chose the page.
    async fn direct_fetch(&self, query: &Query, url: &Url) -> PipelineResult {
        tracing::debug!(url = %url, "direct fetch");
        match self.fetch_and_extract(url.as_str()).await {
            Ok(content) => self.summarize_and_assemble(query, content).await,
            Err(cause) => {
                tracing::warn!(url = %url, %cause, "direct fetch failed");
                PipelineResult::failure(
                    FailureReason::FetchDenied,
                    format!(
                        "Could not read usable content from {url} ({cause}).\n\
                         Likely causes:\n\
                         - the site is down or unreachable\n\
                         - access is restricted (login wall or bot protection)\n\
                         - the URL is invalid or the page has little readable text"
                    ),
                )
            }
        }
    }

    async fn search_resolve(&self, query: &Query, text: &str) -> PipelineResult {
        tracing::trace!(query = text, "resolving query");
        let candidates = self.orchestrator.resolve(text).await;
        if candidates.is_empty() {
            tracing::info!("no candidates found");
            return self.no_source(text, 0).await;
        }

        let attempts = candidates.len().min(self.config.max_attempts);
        match self.extract_loop(text, &candidates[..attempts]).await {
            Some(content) => self.summarize_and_assemble(query, content).await,
            None => self.no_source(text, attempts).await,
        }
    }

    /// Try candidates strictly in order; the first relevant extraction wins.
    async fn extract_loop(
        &self,
        query: &str,
        candidates: &[Candidate],
    ) -> Option<ExtractedContent> {
        for (attempt, candidate) in candidates.iter().enumerate() {
            let attempt = attempt + 1;
            let outcome = match self.fetch_and_extract(&candidate.url).await {
                Ok(content) if self.judge.is_relevant(content.text(), query) => Ok(content),
                Ok(_) => Err(AttemptFailure::Irrelevant),
                Err(e) => Err(e),
            };
            match outcome {
                Ok(content) => {
                    tracing::info!(
                        attempt,
                        url = %candidate.url,
                        score = candidate.score,
                        length = content.len(),
                        "source selected"
                    );
                    return Some(content);
                }
                Err(cause) => {
                    tracing::debug!(attempt, url = %candidate.url, %cause, "candidate skipped");
                }
            }
        }
        None
    }

    async fn fetch_and_extract(
        &self,
        url: &str,
    ) -> std::result::Result<ExtractedContent, AttemptFailure> {
        let document = self.fetcher.fetch(url).await.map_err(AttemptFailure::Fetch)?;
        self.extractor
            .extract(&document)
            .ok_or(AttemptFailure::NoContent)
    }

    async fn summarize_and_assemble(
        &self,
        query: &Query,
        content: ExtractedContent,
    ) -> PipelineResult {
        let (body, used_summarizer) = match &self.summarizer {
            Some(summarizer) => {
                let prefix = content.prefix(self.config.summary_prefix_chars);
                match summarizer.summarize(prefix, query.as_text()).await {
                    Ok(summary) => (summary, true),
                    Err(e) => {
                        tracing::warn!(error = %e, "summarizer failed, using raw excerpt");
                        (answer::excerpt(content.text(), self.config.excerpt_chars), false)
                    }
                }
            }
            None => (answer::excerpt(content.text(), self.config.excerpt_chars), false),
        };

        let retrieved_at = (self.clock)();
        let source_url = content.source_url().to_owned();
        PipelineResult::Success {
            answer: answer::assemble(&body, Some(&source_url), content.len(), retrieved_at),
            source_url: Some(source_url),
            used_summarizer,
            content_length: content.len(),
            retrieved_at,
        }
    }

    /// Terminal path when no candidate yielded content.
    async fn no_source(&self, query: &str, attempted: usize) -> PipelineResult {
        let general = self
            .summarizer
            .as_ref()
            .filter(|_| self.config.answer_without_source);
        if let Some(summarizer) = general {
            match summarizer.answer(query).await {
                Ok(body) => {
                    let retrieved_at = (self.clock)();
                    return PipelineResult::Success {
                        answer: answer::assemble(&body, None, 0, retrieved_at),
                        source_url: None,
                        used_summarizer: true,
                        content_length: 0,
                        retrieved_at,
                    };
                }
                Err(e) => tracing::warn!(error = %e, "general answer unavailable"),
            }
        }

        let lead = if attempted == 0 {
            format!("No reliable source found for \"{query}\".")
        } else {
            format!(
                "No reliable source found for \"{query}\" after trying {attempted} \
                 candidate page(s)."
            )
        };
        PipelineResult::failure(
            FailureReason::NoSourceFound,
            format!(
                "{lead}\n\
                 Suggestions:\n\
                 - use more specific search terms\n\
                 - check the spelling\n\
                 - provide a direct URL to a page about the topic"
            ),
        )
    }
}
