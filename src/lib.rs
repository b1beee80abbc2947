//! webscout: resilient web research.
//!
//! Given a question or a URL, find a trustworthy page, extract its text,
//! check it is on topic, and condense it into a short sourced answer.
//!
//! # Architecture
//!
//! Source discovery lives in the `webscout-search` crate; this crate
//! composes it into a request pipeline:
//! - **Classify**: absolute `http(s)` URLs are fetched directly, anything else is searched
//! - **Search**: engines in priority order, candidates ranked by domain trust
//! - **Extract loop**: candidates fetched one at a time until one yields relevant text
//! - **Relevance**: lexical overlap between query and page
//! - **Summarize**: optional chat-completions call, raw excerpt on failure
//! - **Assemble**: answer, source URL and metadata in a [`PipelineResult`]

pub mod answer;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod relevance;
pub mod summarizer;

pub use config::{PipelineConfig, ResearchConfig, SummarizerConfig};
pub use error::{ResearchError, Result};
pub use pipeline::{Clock, FailureReason, PipelineResult, Query, ResearchPipeline};
pub use relevance::RelevanceJudge;
pub use summarizer::{ChatCompletionsSummarizer, Summarizer, SummarizerError};
