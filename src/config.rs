//! Configuration types for the webscout research pipeline.
//!
//! The whole file is optional: every section and field falls back to its
//! default, so an empty `config.toml` is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use webscout_search::{DomainTable, ExtractConfig, FetchConfig, SearchConfig, TopicFallbacks};

use crate::error::{ResearchError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchConfig {
    /// Search engines and candidate resolution.
    pub search: SearchConfig,
    /// Page download settings.
    pub fetch: FetchConfig,
    /// Content extraction thresholds.
    pub extract: ExtractConfig,
    /// Candidate loop, relevance gate and answer sizing.
    pub pipeline: PipelineConfig,
    /// Chat-completions summarizer.
    pub summarizer: SummarizerConfig,
    /// Domain trust weights and blacklist.
    pub domains: DomainTable,
    /// Curated sources used when every engine comes back empty.
    pub fallbacks: TopicFallbacks,
}

/// Fewest candidates a request may be configured to try.
pub const MIN_ATTEMPTS: usize = 3;
/// Most candidates a request may be configured to try.
pub const MAX_ATTEMPTS: usize = 5;

/// Pipeline controller settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Maximum number of candidates fetched per request (3 to 5).
    pub max_attempts: usize,
    /// Fraction of query tokens that must appear in the page text.
    pub relevance_ratio: f64,
    /// Characters of page text sent to the summarizer.
    pub summary_prefix_chars: usize,
    /// Characters of page text shown when no summary is available.
    pub excerpt_chars: usize,
    /// Ask the summarizer for a general answer when no source is found.
    pub answer_without_source: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            relevance_ratio: 0.3,
            summary_prefix_chars: 3_500,
            excerpt_chars: 1_200,
            answer_without_source: false,
        }
    }
}

impl PipelineConfig {
    /// Validates this configuration.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_ATTEMPTS..=MAX_ATTEMPTS).contains(&self.max_attempts) {
            return Err(ResearchError::Config(format!(
                "pipeline max_attempts must be within {MIN_ATTEMPTS}..={MAX_ATTEMPTS}, got {}",
                self.max_attempts
            )));
        }
        if !(0.0..=1.0).contains(&self.relevance_ratio) {
            return Err(ResearchError::Config(format!(
                "pipeline relevance_ratio must be within 0..=1, got {}",
                self.relevance_ratio
            )));
        }
        if self.summary_prefix_chars == 0 || self.excerpt_chars == 0 {
            return Err(ResearchError::Config(
                "pipeline summary_prefix_chars and excerpt_chars must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// OpenAI-compatible chat-completions summarizer settings.
///
/// The API key itself is never stored here; `api_key_env` names the
/// environment variable that holds it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Set to `false` to always present raw excerpts.
    pub enabled: bool,
    /// API base URL, without the `/chat/completions` suffix.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Environment variable holding the bearer key.
    pub api_key_env: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://api.groq.com/openai/v1".into(),
            model: "llama3-8b-8192".into(),
            api_key_env: "GROQ_API_KEY".into(),
            temperature: 0.4,
            timeout_seconds: 15,
        }
    }
}

impl SummarizerConfig {
    /// Validates this configuration. A disabled summarizer is always valid.
    pub fn validate(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        if url::Url::parse(&self.base_url).is_err() {
            return Err(ResearchError::Config(format!(
                "summarizer base_url is not a valid URL: {}",
                self.base_url
            )));
        }
        if self.model.trim().is_empty() {
            return Err(ResearchError::Config("summarizer model is empty".into()));
        }
        if self.timeout_seconds == 0 {
            return Err(ResearchError::Config(
                "summarizer timeout_seconds must be greater than 0".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ResearchError::Config(format!(
                "summarizer temperature must be within 0..=2, got {}",
                self.temperature
            )));
        }
        Ok(())
    }

    /// Read the API key from the configured environment variable.
    ///
    /// Returns `None` when the variable is unset or blank.
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    }
}

impl ResearchConfig {
    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<()> {
        self.search.validate()?;
        self.fetch.validate()?;
        self.extract.validate()?;
        self.pipeline.validate()?;
        self.summarizer.validate()?;
        Ok(())
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ResearchError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize to pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Config`] if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ResearchError::Config(e.to_string()))
    }

    /// Returns the default config file path: `~/.config/webscout/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("webscout").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("webscout")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/webscout-config/config.toml")
        }
    }
}
