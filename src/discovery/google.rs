use std::collections::HashSet;
use std::time::Duration;

use percent_encoding::percent_decode_str;
use reqwest::blocking::Client;
use scraper::{Html, Selector};
use tracing::{debug, info};
use url::Url;

use crate::error::SearchError;
use crate::pacing::RateLimiter;

const GOOGLE_URL: &str = "https://www.google.com/search";
const PAGE_SIZE: usize = 10;

pub struct SearchRequest<'a> {
    pub query: &'a str,
    pub lang: &'a str,
    pub max_results: usize,
}

/// Something that turns a query into a lazy stream of result URLs.
pub trait SearchProvider {
    fn search<'a>(
        &'a mut self,
        request: &SearchRequest<'a>,
    ) -> Box<dyn Iterator<Item = Result<String, SearchError>> + 'a>;
}

/// One raw results page for `query`, starting at result offset `start`.
pub trait ResultsPages {
    fn results_page(&mut self, query: &str, lang: &str, start: usize) -> Result<String, SearchError>;
}

/// Fetches results pages from Google over HTTP.
pub struct HttpResultsPages {
    client: Client,
}

impl HttpResultsPages {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, SearchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(HttpResultsPages { client })
    }
}

impl ResultsPages for HttpResultsPages {
    fn results_page(&mut self, query: &str, lang: &str, start: usize) -> Result<String, SearchError> {
        let num = PAGE_SIZE.to_string();
        let start = start.to_string();
        debug!("GET {} q={:?} start={}", GOOGLE_URL, query, start);
        let res = self
            .client
            .get(GOOGLE_URL)
            .query(&[("q", query), ("hl", lang), ("num", num.as_str()), ("start", start.as_str())])
            .send()?;
        if !res.status().is_success() {
            return Err(SearchError::Status(res.status().as_u16()));
        }
        Ok(res.text()?)
    }
}

/// Scrapes the plain HTML Google results page, one page at a time.
pub struct GoogleSearch<L, P = HttpResultsPages> {
    pages: P,
    pause: L,
}

impl<L: RateLimiter> GoogleSearch<L> {
    pub fn new(user_agent: &str, timeout: Duration, pause: L) -> Result<Self, SearchError> {
        let pages = HttpResultsPages::new(user_agent, timeout)?;
        Ok(GoogleSearch::with_pages(pages, pause))
    }
}

impl<L: RateLimiter, P: ResultsPages> GoogleSearch<L, P> {
    pub fn with_pages(pages: P, pause: L) -> Self {
        GoogleSearch { pages, pause }
    }
}

impl<L: RateLimiter, P: ResultsPages> SearchProvider for GoogleSearch<L, P> {
    fn search<'a>(
        &'a mut self,
        request: &SearchRequest<'a>,
    ) -> Box<dyn Iterator<Item = Result<String, SearchError>> + 'a> {
        info!("Searching Google for {:?}", request.query);
        Box::new(GooglePages {
            provider: self,
            query: request.query.to_string(),
            lang: request.lang.to_string(),
            max_results: request.max_results,
            start: 0,
            yielded: 0,
            seen: HashSet::new(),
            buffer: Vec::new(),
            done: false,
        })
    }
}

struct GooglePages<'a, L, P> {
    provider: &'a mut GoogleSearch<L, P>,
    query: String,
    lang: String,
    max_results: usize,
    start: usize,
    yielded: usize,
    seen: HashSet<String>,
    buffer: Vec<String>,
    done: bool,
}

impl<L: RateLimiter, P: ResultsPages> GooglePages<'_, L, P> {
    fn load_next_page(&mut self) -> Result<(), SearchError> {
        if self.start > 0 {
            self.provider.pause.wait();
        }
        let html = self
            .provider
            .pages
            .results_page(&self.query, &self.lang, self.start)?;
        self.start += PAGE_SIZE;

        let links = parse_result_links(&html)?;
        let fresh: Vec<String> = links
            .into_iter()
            .filter(|l| self.seen.insert(l.clone()))
            .collect();
        info!("Results page {} gave {} new links", self.start / PAGE_SIZE, fresh.len());
        if fresh.is_empty() {
            self.done = true;
        }
        // popped from the back
        self.buffer = fresh.into_iter().rev().collect();
        Ok(())
    }
}

impl<L: RateLimiter, P: ResultsPages> Iterator for GooglePages<'_, L, P> {
    type Item = Result<String, SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.yielded >= self.max_results {
                return None;
            }
            if let Some(url) = self.buffer.pop() {
                self.yielded += 1;
                return Some(Ok(url));
            }
            if self.done {
                return None;
            }
            if let Err(e) = self.load_next_page() {
                self.done = true;
                return Some(Err(e));
            }
        }
    }
}

/// Pull organic result URLs out of a Google results page.
///
/// Result anchors come either as `/url?q=<target>&sa=...` redirects or as
/// direct absolute links. Google's own hosts are dropped. A page with no
/// `<h3>` headings and no "did not match" notice is treated as a block page.
pub fn parse_result_links(html: &str) -> Result<Vec<String>, SearchError> {
    let doc = Html::parse_document(html);
    let a_sel = Selector::parse("a[href]").unwrap();
    let h3_sel = Selector::parse("h3").unwrap();

    if doc.select(&h3_sel).next().is_none() {
        if html.contains("did not match any documents") {
            return Ok(Vec::new());
        }
        return Err(SearchError::Blocked);
    }

    let mut links = Vec::new();
    for a in doc.select(&a_sel) {
        let Some(href) = a.value().attr("href") else { continue };
        if let Some(target) = result_target(href) {
            if !links.contains(&target) {
                links.push(target);
            }
        }
    }
    Ok(links)
}

fn result_target(href: &str) -> Option<String> {
    let raw = match href.strip_prefix("/url?") {
        Some(params) => {
            let q = params
                .split('&')
                .find_map(|kv| kv.strip_prefix("q=").or_else(|| kv.strip_prefix("url=")))?;
            percent_decode_str(q).decode_utf8_lossy().into_owned()
        }
        None => href.to_string(),
    };

    let parsed = Url::parse(&raw).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    let host = parsed.host_str()?;
    if is_google_host(host) {
        return None;
    }
    Some(raw)
}

fn is_google_host(host: &str) -> bool {
    let host = host.trim_start_matches("www.");
    host == "google.com"
        || host.starts_with("google.")
        || host.ends_with(".google.com")
        || host == "youtube.com"
        || host.ends_with("googleusercontent.com")
        || host.ends_with("gstatic.com")
}
