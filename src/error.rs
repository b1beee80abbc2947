//! Error types for the webscout pipeline.
//!
//! Request processing never surfaces these: every per-request failure
//! becomes a [`PipelineResult::Failure`](crate::pipeline::PipelineResult).
//! They cover configuration loading and client construction only.

use webscout_search::SearchError;

/// Top-level error type for setting up a research pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ResearchError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Search, fetch or extraction setup error.
    #[error("search error: {0}")]
    Search(#[from] SearchError),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ResearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_config() {
        let err = ResearchError::Config("relevance ratio out of range".into());
        assert_eq!(err.to_string(), "config error: relevance ratio out of range");
    }

    #[test]
    fn search_error_converts() {
        let err: ResearchError = SearchError::Config("no engines".into()).into();
        assert!(matches!(err, ResearchError::Search(_)));
        assert_eq!(err.to_string(), "search error: config error: no engines");
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ResearchError = io.into();
        assert!(err.to_string().starts_with("I/O error"));
    }
}
