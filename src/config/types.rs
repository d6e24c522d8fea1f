use crate::output::OutputFormat;
use crate::stats::StatKind;
use serde::Deserialize;
use std::time::Duration;

/// Listing page all leaderboard suffixes are appended to
pub const DEFAULT_BASE_URL: &str = "https://www.premierleague.com/stats/top/players/";

/// Default chromedriver endpoint
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

pub const DEFAULT_PAGE_COUNT: u32 = 3;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scraper: ScraperConfig,
    pub browser: BrowserConfig,
    pub timeouts: TimeoutConfig,
    pub output: OutputConfig,
}

/// What to scrape
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Base listing URL, must end with '/'
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Number of leaderboard pages to read
    #[serde(rename = "page-count")]
    pub page_count: u32,

    /// Leaderboard to scrape
    pub stat: StatKind,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_count: DEFAULT_PAGE_COUNT,
            stat: StatKind::Tackles,
        }
    }
}

/// Browser session settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// WebDriver server to connect to
    #[serde(rename = "webdriver-url")]
    pub webdriver_url: String,

    /// Run the browser without a window
    pub headless: bool,

    /// Extra command-line arguments passed to the browser
    #[serde(rename = "browser-args")]
    pub browser_args: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            headless: true,
            browser_args: Vec::new(),
        }
    }
}

/// Bounded waits, all in milliseconds
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Wait for each cookie-consent control
    #[serde(rename = "consent-ms")]
    pub consent_ms: u64,

    /// Wait for the next-page control to become clickable
    #[serde(rename = "next-page-ms")]
    pub next_page_ms: u64,

    /// Wait for the leaderboard table after the first load
    #[serde(rename = "table-ready-ms")]
    pub table_ready_ms: u64,

    /// Wait for page content to change after clicking next
    #[serde(rename = "settle-ms")]
    pub settle_ms: u64,

    /// Delay between content polls while waiting
    #[serde(rename = "poll-interval-ms")]
    pub poll_interval_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            consent_ms: 10_000,
            next_page_ms: 10_000,
            table_ready_ms: 10_000,
            settle_ms: 5_000,
            poll_interval_ms: 250,
        }
    }
}

impl TimeoutConfig {
    pub fn consent(&self) -> Duration {
        Duration::from_millis(self.consent_ms)
    }

    pub fn next_page(&self) -> Duration {
        Duration::from_millis(self.next_page_ms)
    }

    pub fn table_ready(&self) -> Duration {
        Duration::from_millis(self.table_ready_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Where and how results are rendered
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,

    /// File to write to; stdout when unset
    pub path: Option<String>,
}
