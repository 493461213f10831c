pub mod google;
pub mod policy;

use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::error::SearchError;
use crate::pacing::RateLimiter;
use google::{SearchProvider, SearchRequest};
use policy::{CandidateUrl, TrustPolicy};

/// Outcome of one discovery run.
#[derive(Debug)]
pub enum Discovery {
    Complete(Vec<String>),
    /// The provider failed partway; `urls` holds everything accepted before that.
    Partial { urls: Vec<String>, reason: SearchError },
}

impl Discovery {
    pub fn urls(&self) -> &[String] {
        match self {
            Discovery::Complete(urls) | Discovery::Partial { urls, .. } => urls,
        }
    }

    pub fn into_urls(self) -> Vec<String> {
        match self {
            Discovery::Complete(urls) | Discovery::Partial { urls, .. } => urls,
        }
    }
}

/// Run one search and keep the hits the policy accepts, in search order.
pub fn discover(
    provider: &mut dyn SearchProvider,
    policy: &TrustPolicy,
    limiter: &mut dyn RateLimiter,
    settings: &Settings,
) -> Discovery {
    let query = policy.search_query();
    let request = SearchRequest {
        query: &query,
        lang: &settings.lang,
        max_results: settings.num_results,
    };

    let mut accepted = Vec::new();
    let mut evaluated = 0usize;

    for result in provider.search(&request) {
        let url = match result {
            Ok(url) => url,
            Err(e) => {
                warn!("Error during search: {}", e);
                return Discovery::Partial {
                    urls: accepted,
                    reason: e,
                };
            }
        };

        if evaluated > 0 {
            limiter.wait();
        }
        evaluated += 1;

        let candidate = CandidateUrl::parse(&url);
        let verdict = policy.classify(&candidate);
        if verdict.accepted() {
            info!("Found good site: {}", url);
            accepted.push(url);
        } else {
            debug!("Rejected {} ({:?})", candidate.raw, verdict);
        }
    }

    info!("Evaluated {} search results, accepted {}", evaluated, accepted.len());
    Discovery::Complete(accepted)
}
