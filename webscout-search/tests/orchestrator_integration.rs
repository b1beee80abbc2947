//! Integration tests for the search orchestrator.
//!
//! Real engine scrapers are pointed at local wiremock servers so the full
//! request → parse → dedup → score → sort path runs without touching the
//! network. Live engine tests are marked `#[ignore]` for manual runs.

use webscout_search::engines::bing::BingEngine;
use webscout_search::engines::duckduckgo::DuckDuckGoEngine;
use webscout_search::{
    DomainScorer, DomainTable, EngineTier, ResolveStrategy, SearchBackend, SearchConfig,
    SearchOrchestrator, TopicFallbacks,
};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ddg_page(urls: &[&str]) -> String {
    let results: String = urls
        .iter()
        .map(|u| {
            format!(
                r#"<div class="result results_links web-result"><a class="result__a" href="{u}">Result {u}</a></div>"#
            )
        })
        .collect();
    format!("<html><body>{results}</body></html>")
}

fn bing_page(urls: &[&str]) -> String {
    let results: String = urls
        .iter()
        .map(|u| format!(r#"<li class="b_algo"><h2><a href="{u}">Result {u}</a></h2></li>"#))
        .collect();
    format!(r#"<html><body><ol id="b_results">{results}</ol></body></html>"#)
}

async fn engine_server(status: u16, body: String) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body.clone()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;
    server
}

fn orchestrator(
    backends: Vec<Box<dyn SearchBackend>>,
    strategy: ResolveStrategy,
    fallbacks: TopicFallbacks,
) -> SearchOrchestrator {
    let config = SearchConfig {
        strategy,
        timeout_seconds: 5,
        ..Default::default()
    };
    SearchOrchestrator::new(
        backends,
        config,
        DomainScorer::new(&DomainTable::default()),
        fallbacks,
    )
}

#[tokio::test]
async fn merged_engines_rank_official_domain_first() {
    let ddg = engine_server(
        200,
        ddg_page(&[
            "https://www.shiksha.com/iit-bombay",
            "https://en.wikipedia.org/wiki/IIT_Bombay",
        ]),
    )
    .await;
    let bing = engine_server(
        200,
        bing_page(&[
            "https://en.wikipedia.org/wiki/IIT_Bombay",
            "https://www.iitb.ac.in/",
            "https://www.quora.com/What-is-IIT-Bombay-like",
        ]),
    )
    .await;

    let orchestrator = orchestrator(
        vec![
            Box::new(DuckDuckGoEngine::with_endpoint(ddg.uri())),
            Box::new(BingEngine::with_endpoint(bing.uri())),
        ],
        ResolveStrategy::MergeAll,
        TopicFallbacks::none(),
    );

    let candidates = orchestrator.resolve("IIT Bombay").await;
    let urls: Vec<&str> = candidates.iter().map(|c| c.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://www.iitb.ac.in/",
            "https://en.wikipedia.org/wiki/IIT_Bombay",
            "https://www.shiksha.com/iit-bombay",
            "https://www.quora.com/What-is-IIT-Bombay-like",
        ]
    );

    assert_eq!(candidates[0].score, 90);
    assert_eq!(candidates[0].engine, EngineTier::Secondary);
    assert_eq!(candidates[0].backend, "Bing");
    // Found by both engines; the primary's copy is kept.
    assert_eq!(candidates[1].engine, EngineTier::Primary);
    assert_eq!(candidates[3].score, 0);
}

#[tokio::test]
async fn failing_engine_does_not_sink_the_query() {
    let ddg = engine_server(503, String::new()).await;
    let bing = engine_server(200, bing_page(&["https://www.iitd.ac.in/"])).await;

    let orchestrator = orchestrator(
        vec![
            Box::new(DuckDuckGoEngine::with_endpoint(ddg.uri())),
            Box::new(BingEngine::with_endpoint(bing.uri())),
        ],
        ResolveStrategy::MergeAll,
        TopicFallbacks::none(),
    );

    let candidates = orchestrator.resolve("IIT Delhi").await;
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].url, "https://www.iitd.ac.in/");
}

#[tokio::test]
async fn first_non_empty_stops_at_first_answer() {
    let ddg = engine_server(200, ddg_page(&["https://www.rust-lang.org/"])).await;
    let bing = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(bing_page(&["https://b.example/"])),
        )
        .expect(0)
        .mount(&bing)
        .await;

    let orchestrator = orchestrator(
        vec![
            Box::new(DuckDuckGoEngine::with_endpoint(ddg.uri())),
            Box::new(BingEngine::with_endpoint(bing.uri())),
        ],
        ResolveStrategy::FirstNonEmpty,
        TopicFallbacks::none(),
    );

    let candidates = orchestrator.resolve("rust").await;
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].url, "https://www.rust-lang.org/");
}

#[tokio::test]
async fn all_engines_empty_without_topic_returns_nothing() {
    let ddg = engine_server(200, ddg_page(&[])).await;
    let bing = engine_server(200, bing_page(&[])).await;

    let orchestrator = orchestrator(
        vec![
            Box::new(DuckDuckGoEngine::with_endpoint(ddg.uri())),
            Box::new(BingEngine::with_endpoint(bing.uri())),
        ],
        ResolveStrategy::MergeAll,
        TopicFallbacks::default(),
    );

    assert!(orchestrator.resolve("xyzzy plugh").await.is_empty());
}

#[tokio::test]
async fn all_engines_empty_with_topic_uses_curated_sources() {
    let ddg = engine_server(200, ddg_page(&[])).await;

    let orchestrator = orchestrator(
        vec![Box::new(DuckDuckGoEngine::with_endpoint(ddg.uri()))],
        ResolveStrategy::MergeAll,
        TopicFallbacks::default(),
    );

    let candidates = orchestrator.resolve("NIRF 2024 rankings").await;
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].url, "https://www.nirfindia.org/");
    assert_eq!(candidates[0].engine, EngineTier::Tertiary);
    assert_eq!(candidates[0].backend, webscout_search::orchestrator::FALLBACK_BACKEND);
    assert_eq!(candidates[0].score, 75);
}

#[tokio::test]
async fn resolving_twice_gives_identical_results() {
    let ddg = engine_server(
        200,
        ddg_page(&["https://example.com/a", "https://www.mit.edu/", "https://example.org/b"]),
    )
    .await;

    let orchestrator = orchestrator(
        vec![Box::new(DuckDuckGoEngine::with_endpoint(ddg.uri()))],
        ResolveStrategy::MergeAll,
        TopicFallbacks::none(),
    );

    let first = orchestrator.resolve("mit").await;
    let second = orchestrator.resolve("mit").await;
    assert_eq!(first, second);
    assert_eq!(first[0].url, "https://www.mit.edu/");
}

#[tokio::test]
#[ignore] // Requires network access.
async fn live_default_engines_resolve_iit_bombay() {
    let candidates = webscout_search::search("IIT Bombay", &SearchConfig::default())
        .await
        .expect("valid config");
    assert!(!candidates.is_empty());
    assert!(candidates.windows(2).all(|w| w[0].score >= w[1].score));
}
