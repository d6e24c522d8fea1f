//! pl-stats-scraper main entry point
//!
//! This is the command-line interface for scraping Premier League player
//! leaderboards through a WebDriver-controlled browser.

use anyhow::{Context, Result};
use clap::Parser;
use pl_stats_scraper::config::{load_config_with_hash, validate, Config};
use pl_stats_scraper::output::{write_report, OutputFormat, ScrapeReport};
use pl_stats_scraper::stats::STAT_TABLE;
use pl_stats_scraper::{Coordinator, StatKind, WebDriverSession};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// pl-stats-scraper: Premier League all-time leaderboard scraper
///
/// Drives a browser through the premierleague.com stats pages, dismisses the
/// cookie dialog, and collects player rows from as many pages as requested.
/// A WebDriver server such as chromedriver must be running.
#[derive(Parser, Debug)]
#[command(name = "pl-stats-scraper")]
#[command(version)]
#[command(about = "Scrapes Premier League player leaderboards", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Leaderboard to scrape (see --list-stats)
    #[arg(short, long, value_name = "KIND")]
    stat: Option<StatKind>,

    /// Number of leaderboard pages to read
    #[arg(short, long, value_name = "N")]
    pages: Option<u32>,

    /// Run the browser without a window
    #[arg(long, conflicts_with = "headed")]
    headless: bool,

    /// Run the browser with a visible window
    #[arg(long, conflicts_with = "headless")]
    headed: bool,

    /// WebDriver server URL
    #[arg(long, value_name = "URL")]
    webdriver_url: Option<String>,

    /// Output format: table, markdown or json
    #[arg(short, long, value_name = "FMT")]
    format: Option<OutputFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Print the records gathered so far when a run fails
    #[arg(long)]
    keep_partial: bool,

    /// List the available leaderboards and exit
    #[arg(long, conflicts_with = "dry_run")]
    list_stats: bool,

    /// Validate configuration and show what would be scraped
    #[arg(long, conflicts_with = "list_stats")]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if cli.list_stats {
        handle_list_stats();
        return Ok(());
    }

    let config = load(&cli)?;

    if cli.dry_run {
        handle_dry_run(&config)
    } else {
        handle_scrape(&config, cli.output.as_deref(), cli.keep_partial).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pl_stats_scraper=info,warn"),
            1 => EnvFilter::new("pl_stats_scraper=debug,info"),
            2 => EnvFilter::new("pl_stats_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the config file (or defaults), applies CLI overrides, and validates
fn load(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    apply_overrides(&mut config, cli);
    validate(&config).context("invalid configuration")?;

    Ok(config)
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(stat) = cli.stat {
        config.scraper.stat = stat;
    }
    if let Some(pages) = cli.pages {
        config.scraper.page_count = pages;
    }
    if cli.headless {
        config.browser.headless = true;
    }
    if cli.headed {
        config.browser.headless = false;
    }
    if let Some(url) = &cli.webdriver_url {
        config.browser.webdriver_url = url.clone();
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if let Some(path) = &cli.output {
        config.output.path = Some(path.display().to_string());
    }
}

/// Handles --list-stats: prints every leaderboard the scraper knows
fn handle_list_stats() {
    println!("{:<14} {:<14} URL suffix", "Stat", "Site label");
    for entry in &STAT_TABLE {
        println!(
            "{:<14} {:<14} {}",
            entry.kind.name(),
            entry.label,
            entry.url_suffix
        );
    }
}

/// Handles --dry-run: shows what would be scraped without starting a browser
fn handle_dry_run(config: &Config) -> Result<()> {
    let coordinator = Coordinator::from_config(config)?;

    println!("=== pl-stats-scraper Dry Run ===\n");

    println!("Scrape:");
    println!("  Stat: {} ({})", config.scraper.stat, config.scraper.stat.label());
    println!("  Pages: {}", config.scraper.page_count);
    println!("  URL: {}", coordinator.url_for(config.scraper.stat));

    println!("\nBrowser:");
    println!("  WebDriver: {}", config.browser.webdriver_url);
    println!("  Headless: {}", config.browser.headless);
    println!(
        "  Arguments: {}",
        pl_stats_scraper::session::browser_args(&config.browser).join(" ")
    );

    println!("\nTimeouts:");
    println!("  Consent: {}ms", config.timeouts.consent_ms);
    println!("  Next page: {}ms", config.timeouts.next_page_ms);
    println!("  Table ready: {}ms", config.timeouts.table_ready_ms);
    println!("  Settle: {}ms", config.timeouts.settle_ms);
    println!("  Poll interval: {}ms", config.timeouts.poll_interval_ms);

    println!("\nOutput:");
    println!("  Format: {}", config.output.format);
    println!(
        "  Destination: {}",
        config.output.path.as_deref().unwrap_or("stdout")
    );

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles a normal run
async fn handle_scrape(config: &Config, output: Option<&Path>, keep_partial: bool) -> Result<()> {
    let coordinator = Coordinator::from_config(config)?;
    let kind = config.scraper.stat;
    let page_count = config.scraper.page_count;

    tracing::info!("Connecting to WebDriver at {}", config.browser.webdriver_url);
    let session = WebDriverSession::connect(&config.browser, config.timeouts.poll_interval())
        .await
        .with_context(|| {
            format!(
                "failed to start a browser session at {}",
                config.browser.webdriver_url
            )
        })?;

    let outcome = coordinator.run(session, kind, page_count).await;

    if outcome.rows_skipped > 0 {
        tracing::info!("{} rows dropped for missing fields", outcome.rows_skipped);
    }

    let path = output.map(Path::to_path_buf).or_else(|| config.output.path.as_ref().map(PathBuf::from));

    match outcome.error {
        None => {
            let report = ScrapeReport::new(kind, page_count, outcome.records);
            write_report(&report, config.output.format, path.as_deref())
                .context("failed to write report")?;
            Ok(())
        }
        Some(e) => {
            if keep_partial && !outcome.records.is_empty() {
                tracing::warn!(
                    "Writing {} records gathered before the failure",
                    outcome.records.len()
                );
                let report = ScrapeReport::new(kind, outcome.pages_read, outcome.records);
                write_report(&report, config.output.format, path.as_deref())
                    .context("failed to write partial report")?;
            }
            Err(anyhow::Error::new(e).context(format!("scrape of {} failed", kind)))
        }
    }
}
