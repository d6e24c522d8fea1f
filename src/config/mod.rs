//! Configuration module for the leaderboard scraper
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; missing keys fall back to the defaults in `types`.
//!
//! # Example
//!
//! ```no_run
//! use pl_stats_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("Will scrape {} pages", config.scraper.page_count);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    BrowserConfig, Config, OutputConfig, ScraperConfig, TimeoutConfig, DEFAULT_BASE_URL,
    DEFAULT_PAGE_COUNT, DEFAULT_WEBDRIVER_URL,
};

// Re-export parser and validation functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::{validate, validate_timeouts, MAX_PAGE_COUNT};
