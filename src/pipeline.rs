use chrono::NaiveDate;
use tracing::warn;

use crate::config::Settings;
use crate::discovery::google::SearchProvider;
use crate::discovery::policy::TrustPolicy;
use crate::discovery::{discover, Discovery};
use crate::error::SinkError;
use crate::extractor::{extract_all, ExtractStats};
use crate::fetch::PageFetcher;
use crate::pacing::RateLimiter;
use crate::record::ResultSet;
use crate::sink::ResultSink;

pub struct RunSummary {
    pub discovered: usize,
    pub discovery_complete: bool,
    pub extract: ExtractStats,
    pub written: usize,
}

/// Everything one run talks to.
pub struct Collaborators<'a> {
    pub search: &'a mut dyn SearchProvider,
    pub fetcher: &'a dyn PageFetcher,
    pub limiter: &'a mut dyn RateLimiter,
    pub sink: &'a mut dyn ResultSink,
}

/// discover → extract → persist. Only a sink failure is an error.
pub fn run(
    c: Collaborators<'_>,
    policy: &TrustPolicy,
    settings: &Settings,
    today: NaiveDate,
) -> Result<RunSummary, SinkError> {
    let discovery = discover(&mut *c.search, policy, &mut *c.limiter, settings);
    let discovery_complete = match &discovery {
        Discovery::Complete(_) => true,
        Discovery::Partial { urls, reason } => {
            warn!("Search stopped early ({}); continuing with {} sites", reason, urls.len());
            false
        }
    };
    let urls = discovery.into_urls();

    let mut results = ResultSet::new();
    let extract = extract_all(&urls, c.fetcher, &mut *c.limiter, today, &mut results);
    if results.is_empty() {
        warn!("No resources extracted; writing an empty file");
    }
    let written = c.sink.persist(&results)?;

    Ok(RunSummary {
        discovered: urls.len(),
        discovery_complete,
        extract,
        written,
    })
}
