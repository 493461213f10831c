use std::path::PathBuf;

use thiserror::Error;

/// Failure contacting or iterating the search backend.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("search backend returned HTTP {0}")]
    Status(u16),
    #[error("search results page blocked (captcha or consent wall)")]
    Blocked,
}

/// Failure fetching a candidate page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {0}")]
    Status(u16),
}

impl FetchError {
    /// Whether the attempt got as far as sending a request.
    pub fn reached_network(&self) -> bool {
        !matches!(self, FetchError::InvalidUrl { .. })
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else if e.is_builder() {
            FetchError::InvalidUrl {
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
                reason: e.to_string(),
            }
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

/// Failure persisting the result set.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("failed to flush {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_invalid_url_skips_the_network() {
        let invalid = FetchError::InvalidUrl {
            url: "not a url".into(),
            reason: "relative URL without a base".into(),
        };
        assert!(!invalid.reached_network());
        assert!(FetchError::Timeout.reached_network());
        assert!(FetchError::Status(500).reached_network());
        assert!(FetchError::Network("connection refused".into()).reached_network());
    }

    #[test]
    fn status_message() {
        assert_eq!(FetchError::Status(503).to_string(), "HTTP 503");
    }
}
