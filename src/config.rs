use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) MentalHealthResourceFinder/1.0";
pub const SEARCH_LANG: &str = "en";
pub const NUM_RESULTS: usize = 100;
pub const FETCH_TIMEOUT_SECS: u64 = 10;
pub const DELAY_SECS: RangeInclusive<f64> = 1.0..=3.0;
pub const OUTPUT_PATH: &str = "mental_health_resources.csv";

/// Run-wide tunables. Everything is compiled in; `Settings::default()` is the
/// only constructor used outside of tests.
#[derive(Debug, Clone)]
pub struct Settings {
    pub lang: String,
    pub num_results: usize,
    pub delay_secs: RangeInclusive<f64>,
    pub fetch_timeout: Duration,
    pub user_agent: String,
    pub output_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            lang: SEARCH_LANG.to_string(),
            num_results: NUM_RESULTS,
            delay_secs: DELAY_SECS,
            fetch_timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
            output_path: PathBuf::from(OUTPUT_PATH),
        }
    }
}
