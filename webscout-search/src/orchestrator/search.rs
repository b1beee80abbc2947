//! Core search orchestrator: engine fan-out, merge, domain scoring, ranking.
//!
//! Resolves a free-text query to a ranked candidate list. Engines are
//! either tried one after another until one yields links
//! ([`ResolveStrategy::FirstNonEmpty`]) or queried concurrently and merged
//! ([`ResolveStrategy::MergeAll`]). Candidates are deduplicated by exact
//! URL, scored by the [`DomainScorer`], and stable-sorted so equal scores
//! keep engine-priority then discovery order.

use crate::config::{ResolveStrategy, SearchConfig};
use crate::engine::SearchBackend;
use crate::engines::backend_for;
use crate::error::SearchError;
use crate::types::{Candidate, EngineTier, SearchHit};

use super::dedup::{deduplicate, EngineHits};
use super::fallback::TopicFallbacks;
use super::scoring::{DomainScorer, DomainTable};

/// Backend name recorded on candidates that come from the topic table.
pub const FALLBACK_BACKEND: &str = "topic-fallback";

/// Multi-engine candidate resolver.
///
/// Holds no mutable state: every [`resolve`](Self::resolve) call builds
/// its own candidate list.
pub struct SearchOrchestrator {
    backends: Vec<Box<dyn SearchBackend>>,
    config: SearchConfig,
    scorer: DomainScorer,
    fallbacks: TopicFallbacks,
}

impl SearchOrchestrator {
    /// Build an orchestrator over explicit backends, in priority order.
    pub fn new(
        backends: Vec<Box<dyn SearchBackend>>,
        config: SearchConfig,
        scorer: DomainScorer,
        fallbacks: TopicFallbacks,
    ) -> Self {
        Self {
            backends,
            config,
            scorer,
            fallbacks,
        }
    }

    /// Build an orchestrator over the public engines named in `config.engines`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` fails validation.
    pub fn from_config(
        config: SearchConfig,
        table: &DomainTable,
        fallbacks: TopicFallbacks,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        let backends = config.engines.iter().map(|e| backend_for(*e)).collect();
        Ok(Self::new(
            backends,
            config,
            DomainScorer::new(table),
            fallbacks,
        ))
    }

    /// Number of configured backends.
    pub fn backend_count(&self) -> usize {
        self.backends.len()
    }

    /// Resolve `query` to candidates ordered by descending trust score.
    ///
    /// Never fails: engine errors degrade to empty lists. An empty return
    /// value means no engine and no curated topic produced a source.
    pub async fn resolve(&self, query: &str) -> Vec<Candidate> {
        let lists = match self.config.strategy {
            ResolveStrategy::FirstNonEmpty => self.first_non_empty(query).await,
            ResolveStrategy::MergeAll => self.merge_all(query).await,
        };

        let mut candidates = deduplicate(lists);
        if candidates.is_empty() {
            candidates = self.fallback_candidates(query);
        }

        let ranked = self.rank(candidates);
        tracing::debug!(count = ranked.len(), "candidates resolved");
        ranked
    }

    /// Query backends in priority order, stopping at the first non-empty list.
    async fn first_non_empty(&self, query: &str) -> Vec<EngineHits> {
        for (index, backend) in self.backends.iter().enumerate() {
            let hits = backend.search_best_effort(query, &self.config).await;
            if !hits.is_empty() {
                tracing::debug!(engine = backend.name(), count = hits.len(), "engine answered");
                return vec![tag(index, &**backend, hits)];
            }
        }
        Vec::new()
    }

    /// Query every backend concurrently; results stay in priority order.
    async fn merge_all(&self, query: &str) -> Vec<EngineHits> {
        let futures = self
            .backends
            .iter()
            .map(|backend| backend.search_best_effort(query, &self.config));
        let outcomes = futures::future::join_all(futures).await;

        outcomes
            .into_iter()
            .zip(self.backends.iter())
            .enumerate()
            .filter(|(_, (hits, _))| !hits.is_empty())
            .map(|(index, (hits, backend))| {
                tracing::debug!(engine = backend.name(), count = hits.len(), "engine answered");
                tag(index, &**backend, hits)
            })
            .collect()
    }

    /// Curated candidates for `query`, or nothing.
    fn fallback_candidates(&self, query: &str) -> Vec<Candidate> {
        let Some(topic) = self.fallbacks.lookup(query) else {
            return Vec::new();
        };
        tracing::info!(topic = %topic.label, "all engines empty, using curated sources");
        deduplicate(vec![EngineHits {
            tier: EngineTier::Tertiary,
            backend: FALLBACK_BACKEND.to_owned(),
            hits: topic
                .urls
                .iter()
                .map(|url| SearchHit {
                    url: url.clone(),
                    title: topic.label.clone(),
                })
                .collect(),
        }])
    }

    /// Assign domain scores and stable-sort descending.
    fn rank(&self, mut candidates: Vec<Candidate>) -> Vec<Candidate> {
        for candidate in &mut candidates {
            candidate.score = self.scorer.score(&candidate.url);
        }
        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        candidates
    }
}

fn tag(index: usize, backend: &dyn SearchBackend, hits: Vec<SearchHit>) -> EngineHits {
    EngineHits {
        tier: EngineTier::from_index(index),
        backend: backend.name().to_owned(),
        hits,
    }
}
