pub mod fields;
pub mod text;

use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use scraper::Html;
use tracing::{info, warn};

use crate::error::FetchError;
use crate::fetch::PageFetcher;
use crate::pacing::RateLimiter;
use crate::record::{ResourceRecord, ResultSet};

/// Per-URL result: a finished record, or the reason the URL was dropped.
#[derive(Debug)]
pub enum ExtractOutcome {
    Record(ResourceRecord),
    Skipped(FetchError),
}

/// Counts returned after an extraction pass.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub total: usize,
    pub ok: usize,
    pub skipped: usize,
}

/// Fetch one page and build its record. Field extraction never fails.
pub fn extract(url: &str, fetcher: &dyn PageFetcher, today: NaiveDate) -> ExtractOutcome {
    info!("Scraping: {}", url);
    match fetcher.fetch(url) {
        Ok(html) => ExtractOutcome::Record(build_record(url, &html, today)),
        Err(e) => ExtractOutcome::Skipped(e),
    }
}

pub fn build_record(url: &str, html: &str, today: NaiveDate) -> ResourceRecord {
    let doc = Html::parse_document(html);
    let visible = text::visible_text(&doc);
    ResourceRecord {
        title: fields::title(&doc),
        description: fields::description(&doc),
        contact: fields::contact(&visible),
        services: fields::services(&visible),
        source_url: url.to_string(),
        last_updated: today,
    }
}

/// Scrape URLs one after another, appending each record as soon as it exists.
pub fn extract_all(
    urls: &[String],
    fetcher: &dyn PageFetcher,
    limiter: &mut dyn RateLimiter,
    today: NaiveDate,
    results: &mut ResultSet,
) -> ExtractStats {
    let pb = ProgressBar::new(urls.len() as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40} {pos}/{len} ({eta})")
    {
        pb.set_style(style.progress_chars("=> "));
    }

    let mut stats = ExtractStats {
        total: urls.len(),
        ..Default::default()
    };

    for url in urls {
        let paced = match extract(url, fetcher, today) {
            ExtractOutcome::Record(record) => {
                results.push(record);
                stats.ok += 1;
                true
            }
            ExtractOutcome::Skipped(e) => {
                warn!("Error scraping {}: {}", url, e);
                stats.skipped += 1;
                e.reached_network()
            }
        };
        if paced {
            limiter.wait();
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!(
        "Scraped {} pages ({} ok, {} skipped)",
        stats.total, stats.ok, stats.skipped
    );
    stats
}


#[cfg(test)]
mod tests {
    use super::testing::MapFetcher;
    use super::*;
    use crate::extractor::fields::{NO_CONTACT, NO_DESCRIPTION, NO_SERVICES, NO_TITLE};
    use crate::pacing::testing::CountingLimiter;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[test]
    fn helpline_page() {
        let r = build_record("https://www.samhsa.gov/find-help", &fixture("helpline"), today());
        assert_eq!(r.title, "SAMHSA's National Helpline");
        assert!(r.description.starts_with("Free, confidential, 24/7"));
        assert_eq!(r.contact, "Phone: 800-662-4357");
        assert_eq!(r.services, "support, hotline, chat");
        assert_eq!(r.source_url, "https://www.samhsa.gov/find-help");
        assert_eq!(r.last_updated.to_string(), "2026-10-17");
    }

    #[test]
    fn sparse_page_gets_sentinels() {
        let r = build_record("https://example.com/help", &fixture("sparse"), today());
        assert_eq!(r.title, NO_TITLE);
        assert_eq!(r.description, NO_DESCRIPTION);
        assert_eq!(r.contact, NO_CONTACT);
        assert_eq!(r.services, NO_SERVICES);
    }

    #[test]
    fn failed_fetches_are_skipped_and_processing_continues() {
        let fetcher = MapFetcher::default()
            .failing("https://slow.org/help", FetchError::Timeout)
            .failing("https://broken.org/help", FetchError::Status(500))
            .page(
                "https://www.nami.org/help",
                "<h1>NAMI HelpLine</h1><p>Call 800-950-6264</p>",
            );
        let urls: Vec<String> = [
            "https://slow.org/help",
            "https://broken.org/help",
            "https://www.nami.org/help",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let mut limiter = CountingLimiter::default();
        let mut results = ResultSet::new();
        let stats = extract_all(&urls, &fetcher, &mut limiter, today(), &mut results);

        assert_eq!(stats, ExtractStats { total: 3, ok: 1, skipped: 2 });
        assert_eq!(results.len(), 1);
        let r = results.iter().next().unwrap();
        assert_eq!(r.title, "NAMI HelpLine");
        assert_eq!(r.contact, "Phone: 800-950-6264");
        // every attempt reached the network
        assert_eq!(limiter.calls, 3);
    }

    #[test]
    fn invalid_url_does_not_pause() {
        let fetcher = MapFetcher::default().failing(
            "not a url",
            FetchError::InvalidUrl {
                url: "not a url".into(),
                reason: "relative URL without a base".into(),
            },
        );
        let urls = vec!["not a url".to_string()];
        let mut limiter = CountingLimiter::default();
        let mut results = ResultSet::new();
        let stats = extract_all(&urls, &fetcher, &mut limiter, today(), &mut results);

        assert_eq!(stats.skipped, 1);
        assert!(results.is_empty());
        assert_eq!(limiter.calls, 0);
    }

    #[test]
    fn records_keep_input_order() {
        let fetcher = MapFetcher::default()
            .page("https://a.org/help", "<h1>A</h1>")
            .page("https://b.org/help", "<h1>B</h1>");
        let urls = vec!["https://b.org/help".to_string(), "https://a.org/help".to_string()];
        let mut results = ResultSet::new();
        extract_all(&urls, &fetcher, &mut CountingLimiter::default(), today(), &mut results);

        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["B", "A"]);
    }

    #[test]
    fn extract_reports_skip_reason() {
        let fetcher = MapFetcher::default().failing("https://x.org/", FetchError::Status(404));
        match extract("https://x.org/", &fetcher, today()) {
            ExtractOutcome::Skipped(FetchError::Status(404)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
