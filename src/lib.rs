//! pl-stats-scraper: Premier League leaderboard scraper
//!
//! This crate drives a browser session through the paginated "top players"
//! statistics tables, extracts one record per ranked row, and renders the
//! collected rows as a table.

pub mod config;
pub mod output;
pub mod scrape;
pub mod session;
pub mod state;
pub mod stats;

use std::time::Duration;
use thiserror::Error;

/// Main error type for scraper operations
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Navigation to {url} failed: {source}")]
    Navigation { url: String, source: SessionError },

    #[error("Pagination failed after page {page}: {source}")]
    Pagination { page: u32, source: SessionError },

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Invalid session transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::SessionState,
        to: state::SessionState,
    },

    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Unknown statistic '{0}'")]
    UnknownStat(String),
}

/// Errors raised by the browser session boundary
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to start browser session: {0}")]
    Connect(String),

    #[error("No clickable element matched '{selector}' within {timeout:?}")]
    ElementNotFound { selector: String, timeout: Duration },

    #[error("WebDriver command failed: {0}")]
    Command(String),
}

/// Errors raised while rendering or writing output
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for scraper operations
pub type Result<T> = std::result::Result<T, ScraperError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for session operations
pub type SessionResult<T> = std::result::Result<T, SessionError>;

// Re-export commonly used types
pub use config::Config;
pub use scrape::{extract_rows, Coordinator, RowExtractor, ScrapeOutcome};
pub use session::{Session, WebDriverSession};
pub use state::{ConsentOutcome, SessionState};
pub use stats::{PlayerStatRecord, StatKind};
