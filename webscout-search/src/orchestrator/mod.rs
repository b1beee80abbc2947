//! Search orchestrator: engine fan-out, dedup, domain scoring, ranking.
//!
//! This module turns a free-text query into a ranked list of candidate
//! sources. Engines are queried in priority order, hits are deduplicated by
//! exact URL, every candidate is scored by domain trust, and a curated
//! topic table fills in when every engine comes back empty.

pub mod dedup;
pub mod fallback;
pub mod scoring;
pub mod search;

pub use fallback::{TopicFallback, TopicFallbacks};
pub use scoring::{DomainScorer, DomainTable, DomainWeight};
pub use search::{SearchOrchestrator, FALLBACK_BACKEND};
