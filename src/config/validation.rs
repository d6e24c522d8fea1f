use crate::config::types::{BrowserConfig, Config, OutputConfig, ScraperConfig, TimeoutConfig};
use crate::stats::validate_stat_table;
use crate::ConfigError;
use url::Url;

/// Largest page budget accepted for one run
pub const MAX_PAGE_COUNT: u32 = 50;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_stat_table()?;
    validate_scraper_config(&config.scraper)?;
    validate_browser_config(&config.browser)?;
    validate_timeouts(&config.timeouts)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates scraper configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    let url = validate_http_url("base-url", &config.base_url)?;

    if !url.path().ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "base-url must end with '/', got '{}'",
            config.base_url
        )));
    }

    if url.query().is_some() {
        return Err(ConfigError::Validation(format!(
            "base-url must not carry a query string, got '{}'",
            config.base_url
        )));
    }

    if config.page_count < 1 || config.page_count > MAX_PAGE_COUNT {
        return Err(ConfigError::Validation(format!(
            "page-count must be between 1 and {}, got {}",
            MAX_PAGE_COUNT, config.page_count
        )));
    }

    Ok(())
}

/// Validates browser configuration
fn validate_browser_config(config: &BrowserConfig) -> Result<(), ConfigError> {
    validate_http_url("webdriver-url", &config.webdriver_url)?;

    if let Some(arg) = config.browser_args.iter().find(|a| a.trim().is_empty()) {
        return Err(ConfigError::Validation(format!(
            "browser-args cannot contain empty arguments, got '{}'",
            arg
        )));
    }

    Ok(())
}

/// Validates timeout configuration
pub fn validate_timeouts(config: &TimeoutConfig) -> Result<(), ConfigError> {
    let waits = [
        ("consent-ms", config.consent_ms),
        ("next-page-ms", config.next_page_ms),
        ("table-ready-ms", config.table_ready_ms),
        ("settle-ms", config.settle_ms),
    ];

    if config.poll_interval_ms == 0 {
        return Err(ConfigError::Validation(
            "poll-interval-ms must be > 0".to_string(),
        ));
    }

    for (name, value) in waits {
        if value == 0 {
            return Err(ConfigError::Validation(format!(
                "{} must be > 0",
                name
            )));
        }

        if value < config.poll_interval_ms {
            return Err(ConfigError::Validation(format!(
                "{} ({}ms) must not be shorter than poll-interval-ms ({}ms)",
                name, value, config.poll_interval_ms
            )));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if let Some(path) = &config.path {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output path cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

/// Parses `value` as an absolute http(s) URL
fn validate_http_url(field: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must use http or https, got '{}'",
            field, value
        )));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_base_url() {
        let mut config = ScraperConfig::default();
        assert!(validate_scraper_config(&config).is_ok());

        config.base_url = "https://www.premierleague.com/stats/top/players".to_string();
        assert!(matches!(
            validate_scraper_config(&config),
            Err(ConfigError::Validation(_))
        ));

        config.base_url = "ftp://example.com/".to_string();
        assert!(matches!(
            validate_scraper_config(&config),
            Err(ConfigError::InvalidUrl(_))
        ));

        config.base_url = "not a url".to_string();
        assert!(matches!(
            validate_scraper_config(&config),
            Err(ConfigError::InvalidUrl(_))
        ));

        config.base_url = "https://example.com/top/?se=-1".to_string();
        assert!(validate_scraper_config(&config).is_err());
    }

    #[test]
    fn test_validate_page_count_bounds() {
        let mut config = ScraperConfig::default();

        config.page_count = 0;
        assert!(validate_scraper_config(&config).is_err());

        config.page_count = 1;
        assert!(validate_scraper_config(&config).is_ok());

        config.page_count = MAX_PAGE_COUNT;
        assert!(validate_scraper_config(&config).is_ok());

        config.page_count = MAX_PAGE_COUNT + 1;
        assert!(validate_scraper_config(&config).is_err());
    }

    #[test]
    fn test_validate_browser_config() {
        let mut config = BrowserConfig::default();
        assert!(validate_browser_config(&config).is_ok());

        config.browser_args = vec!["--lang=en".to_string(), " ".to_string()];
        assert!(validate_browser_config(&config).is_err());

        config.browser_args.clear();
        config.webdriver_url = "localhost".to_string();
        assert!(validate_browser_config(&config).is_err());
    }

    #[test]
    fn test_validate_timeouts() {
        let mut config = TimeoutConfig::default();
        assert!(validate_timeouts(&config).is_ok());

        config.settle_ms = 0;
        assert!(validate_timeouts(&config).is_err());

        config.settle_ms = 100;
        config.poll_interval_ms = 200;
        assert!(validate_timeouts(&config).is_err());

        config.poll_interval_ms = 0;
        assert!(validate_timeouts(&config).is_err());
    }

    #[test]
    fn test_validate_output_path() {
        let mut config = OutputConfig::default();
        assert!(validate_output_config(&config).is_ok());

        config.path = Some("  ".to_string());
        assert!(validate_output_config(&config).is_err());
    }
}
