//! Error types for the webscout-search crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. Queries are never embedded in messages.

/// Errors that can occur while searching, fetching or extracting.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// An HTTP request failed at the transport level.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A request exceeded its deadline and was aborted.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The remote server answered with a non-success status.
    #[error("access denied: HTTP {status}")]
    Denied {
        /// The HTTP status code returned.
        status: u16,
    },

    /// Failed to parse a response body.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Map a [`reqwest::Error`] to the matching variant.
    pub(crate) fn from_reqwest(context: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(format!("{context}: {err}"))
        } else if let Some(status) = err.status() {
            Self::Denied {
                status: status.as_u16(),
            }
        } else {
            Self::Http(format!("{context}: {err}"))
        }
    }
}

/// Convenience type alias for webscout-search results.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_http() {
        let err = SearchError::Http("connection refused".into());
        assert_eq!(err.to_string(), "HTTP error: connection refused");
    }

    #[test]
    fn display_timeout() {
        let err = SearchError::Timeout("exceeded 15s limit".into());
        assert_eq!(err.to_string(), "request timed out: exceeded 15s limit");
    }

    #[test]
    fn display_denied() {
        let err = SearchError::Denied { status: 403 };
        assert_eq!(err.to_string(), "access denied: HTTP 403");
    }

    #[test]
    fn display_config() {
        let err = SearchError::Config("max_results_per_engine must be > 0".into());
        assert_eq!(
            err.to_string(),
            "config error: max_results_per_engine must be > 0"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
    }
}
