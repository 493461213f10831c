use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::error::FetchError;

/// Given a URL, return the raw page body or fail.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Blocking HTTP fetcher with a fixed identity and timeout.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Fails only on a bad client configuration; no request is made.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(HttpFetcher { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let res = self.client.get(parsed).send()?;
        let status = res.status();
        debug!("{} -> {}", url, status);
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(res.text()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_user_agent_is_a_builder_error() {
        let err = HttpFetcher::new("broken\nagent", Duration::from_secs(1))
            .err()
            .unwrap();
        assert!(err.is_builder());
    }

    #[test]
    fn malformed_url_never_sent() {
        let fetcher = HttpFetcher::new("test-agent", Duration::from_secs(1)).unwrap();
        let err = fetcher.fetch("not a url").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
        assert!(!err.reached_network());
    }
}
