use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use mh_resource_finder::config::Settings;
use mh_resource_finder::discovery::google::GoogleSearch;
use mh_resource_finder::discovery::policy::TrustPolicy;
use mh_resource_finder::discovery::{self, Discovery};
use mh_resource_finder::fetch::HttpFetcher;
use mh_resource_finder::pacing::RandomDelay;
use mh_resource_finder::pipeline::{self, Collaborators};
use mh_resource_finder::sink::CsvSink;

#[derive(Parser)]
#[command(
    name = "mh_resource_finder",
    about = "Find and scrape free mental health resource sites into a CSV"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search, scrape every accepted site and write the CSV (default)
    Run,
    /// Search only and print the accepted sites
    Discover,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = Settings::default();
    let policy = TrustPolicy::default();
    info!(settings = ?settings, "Starting mental health resource finder");

    let t0 = Instant::now();
    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(&settings, &policy),
        Commands::Discover => discover_only(&settings, &policy),
    };

    println!("\nDone in {:.1}s", t0.elapsed().as_secs_f64());
    result
}

fn search_provider(settings: &Settings) -> Result<GoogleSearch<RandomDelay>> {
    GoogleSearch::new(
        &settings.user_agent,
        settings.fetch_timeout,
        RandomDelay::new(settings.delay_secs.clone()),
    )
    .context("Failed to build search client")
}

fn run(settings: &Settings, policy: &TrustPolicy) -> Result<()> {
    println!("Starting mental health resource scraping...");

    let mut search = search_provider(settings)?;
    let fetcher = HttpFetcher::new(&settings.user_agent, settings.fetch_timeout)
        .context("Failed to build page fetcher")?;
    let mut limiter = RandomDelay::new(settings.delay_secs.clone());
    let mut sink = CsvSink::new(&settings.output_path);

    let today = chrono::Local::now().date_naive();
    let summary = pipeline::run(
        Collaborators {
            search: &mut search,
            fetcher: &fetcher,
            limiter: &mut limiter,
            sink: &mut sink,
        },
        policy,
        settings,
        today,
    )
    .with_context(|| format!("Failed to save results to {:?}", sink.path()))?;

    println!(
        "Discovered {} sites{}",
        summary.discovered,
        if summary.discovery_complete { "" } else { " (search stopped early)" }
    );
    println!(
        "Scraped {} ({} ok, {} skipped)",
        summary.extract.total, summary.extract.ok, summary.extract.skipped
    );
    println!("Saved {} resources to {}", summary.written, sink.path().display());
    println!("Scraping complete!");
    Ok(())
}

fn discover_only(settings: &Settings, policy: &TrustPolicy) -> Result<()> {
    println!("Searching Google for mental health resources...");

    let mut search = search_provider(settings)?;
    let mut limiter = RandomDelay::new(settings.delay_secs.clone());
    let found = discovery::discover(&mut search, policy, &mut limiter, settings);

    let note = match &found {
        Discovery::Complete(_) => "",
        Discovery::Partial { .. } => " (search stopped early)",
    };
    println!("\nFound these potential mental health resources{}:", note);
    for (i, url) in found.urls().iter().enumerate() {
        println!("{}. {}", i + 1, url);
    }
    Ok(())
}
