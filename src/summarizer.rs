//! Summarization capability and its OpenAI-compatible implementation.
//!
//! Summarization is optional and never fatal: when the capability is
//! absent or fails, the pipeline presents a raw excerpt instead.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::config::SummarizerConfig;
use crate::error::{ResearchError, Result};
use crate::pipeline::Clock;

/// System prompt sent with every request.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that gives brief and accurate \
     descriptions of topics or institutions.";

/// Appended to the system prompt so stale answers are flagged as such.
const CUTOFF_NOTICE: &str =
    "If you don't have recent information about something, mention your knowledge cutoff.";

/// System message for a request made at `now`.
fn system_message(now: DateTime<Utc>) -> String {
    format!(
        "Current date: {}\n\n{SYSTEM_PROMPT}\n{CUTOFF_NOTICE}",
        now.format("%Y-%m-%d")
    )
}

/// Non-fatal summarizer failure.
#[derive(Debug, thiserror::Error)]
pub enum SummarizerError {
    /// The capability is not configured, could not be reached, or answered
    /// with nothing usable.
    #[error("summarizer unavailable: {0}")]
    Unavailable(String),
}

/// Condenses page text into a short answer.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `text` as an answer to `query`.
    async fn summarize(
        &self,
        text: &str,
        query: &str,
    ) -> std::result::Result<String, SummarizerError>;

    /// Answer `query` from general knowledge, without a source page.
    async fn answer(&self, query: &str) -> std::result::Result<String, SummarizerError>;
}

/// [`Summarizer`] speaking the non-streaming chat-completions protocol.
pub struct ChatCompletionsSummarizer {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f64,
    clock: Clock,
}

impl std::fmt::Debug for ChatCompletionsSummarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionsSummarizer")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionsSummarizer {
    /// Build a summarizer with an explicit key.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Config`] if `config` is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: &SummarizerConfig, api_key: impl Into<String>) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                ResearchError::Config(format!("failed to build summarizer client: {e}"))
            })?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            api_key: api_key.into(),
            temperature: config.temperature,
            clock: Arc::new(Utc::now),
        })
    }

    /// Replace the clock used to date each request.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Build a summarizer from config, reading the key from `api_key_env`.
    ///
    /// Returns `Ok(None)` when the summarizer is disabled or no key is set.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn from_config(config: &SummarizerConfig) -> Result<Option<Self>> {
        if !config.enabled {
            return Ok(None);
        }
        let Some(key) = config.resolve_api_key() else {
            tracing::info!(
                var = %config.api_key_env,
                "no summarizer key set, answers will be raw excerpts"
            );
            return Ok(None);
        };
        Self::new(config, key).map(Some)
    }

    async fn complete(&self, prompt: &str) -> std::result::Result<String, SummarizerError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_message((self.clock)()) },
                { "role": "user", "content": prompt },
            ],
            "temperature": self.temperature,
            "stream": false,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SummarizerError::Unavailable(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(SummarizerError::Unavailable(format!(
                "HTTP {}: {}",
                status.as_u16(),
                extract_error_message(&body_text)
            )));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| SummarizerError::Unavailable(format!("malformed response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| SummarizerError::Unavailable("empty completion".into()))
    }
}

#[async_trait]
impl Summarizer for ChatCompletionsSummarizer {
    async fn summarize(
        &self,
        text: &str,
        query: &str,
    ) -> std::result::Result<String, SummarizerError> {
        let prompt = format!(
            "Give a brief and accurate description of the following topic based on this info.\n\
             Topic: {query}\n\n{text}"
        );
        self.complete(&prompt).await
    }

    async fn answer(&self, query: &str) -> std::result::Result<String, SummarizerError> {
        self.complete(&format!("Give a short and clear explanation about: {query}"))
            .await
    }
}

/// Pull `error.message` out of an OpenAI-style error body.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn summarizer(server: &MockServer) -> ChatCompletionsSummarizer {
        let config = SummarizerConfig {
            base_url: format!("{}/openai/v1", server.uri()),
            timeout_seconds: 2,
            ..Default::default()
        };
        ChatCompletionsSummarizer::new(&config, "test-key").unwrap()
    }

    fn completion(text: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-1",
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": text } }]
        })
    }

    #[tokio::test]
    async fn summarize_sends_expected_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "llama3-8b-8192",
                "temperature": 0.4,
                "stream": false,
            })))
            .and(body_string_contains("IIT Bombay"))
            .and(body_string_contains("brief and accurate descriptions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion("  A premier institute.  ")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let summary = summarizer(&server)
            .summarize("Page text about Powai.", "IIT Bombay")
            .await
            .unwrap();
        assert_eq!(summary, "A premier institute.");
    }

    #[tokio::test]
    async fn answer_uses_general_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("Give a short and clear explanation about: NIRF"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion("A ranking framework.")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let answer = summarizer(&server).answer("NIRF").await.unwrap();
        assert_eq!(answer, "A ranking framework.");
    }

    #[tokio::test]
    async fn requests_carry_current_date_and_cutoff_notice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("Current date: 2025-01-15"))
            .and(body_string_contains("mention your knowledge cutoff"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("Dated.")))
            .expect(2)
            .mount(&server)
            .await;

        let fixed = Utc.with_ymd_and_hms(2025, 1, 15, 23, 59, 0).unwrap();
        let summarizer = summarizer(&server).with_clock(Arc::new(move || fixed));
        assert_eq!(summarizer.answer("NIRF").await.unwrap(), "Dated.");
        assert_eq!(summarizer.summarize("text", "NIRF").await.unwrap(), "Dated.");
    }

    #[test]
    fn system_message_layout() {
        let at = Utc.with_ymd_and_hms(2024, 12, 31, 8, 0, 0).unwrap();
        let message = system_message(at);
        assert!(message.starts_with("Current date: 2024-12-31\n\nYou are a helpful assistant"));
        assert!(message.ends_with(CUTOFF_NOTICE));
    }

    #[tokio::test]
    async fn error_status_is_unavailable_with_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": { "message": "Invalid API Key" }
            })))
            .mount(&server)
            .await;

        let err = summarizer(&server).summarize("text", "query").await.unwrap_err();
        let SummarizerError::Unavailable(message) = err;
        assert!(message.contains("401"));
        assert!(message.contains("Invalid API Key"));
    }

    #[tokio::test]
    async fn empty_choices_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&server)
            .await;

        assert!(summarizer(&server).answer("query").await.is_err());
    }

    #[tokio::test]
    async fn malformed_body_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        assert!(summarizer(&server).answer("query").await.is_err());
    }

    #[test]
    fn disabled_config_builds_nothing() {
        let config = SummarizerConfig {
            enabled: false,
            ..Default::default()
        };
        assert!(ChatCompletionsSummarizer::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn missing_key_builds_nothing() {
        let config = SummarizerConfig {
            api_key_env: "WEBSCOUT_TEST_KEY_THAT_IS_NEVER_SET".into(),
            ..Default::default()
        };
        assert!(ChatCompletionsSummarizer::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn trailing_slash_in_base_url_is_tolerated() {
        let config = SummarizerConfig {
            base_url: "http://localhost:8080/v1/".into(),
            ..Default::default()
        };
        let summarizer = ChatCompletionsSummarizer::new(&config, "k").unwrap();
        assert_eq!(summarizer.endpoint, "http://localhost:8080/v1/chat/completions");
    }
}
