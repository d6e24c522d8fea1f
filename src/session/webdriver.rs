//! WebDriver-backed session
//!
//! Connects to a running WebDriver server (chromedriver by default) and maps
//! the `Session` operations onto `thirtyfour` commands.

use crate::config::BrowserConfig;
use crate::session::Session;
use crate::{SessionError, SessionResult};
use std::time::{Duration, Instant};
use thirtyfour::prelude::*;

/// Arguments every Chrome session is started with
const DEFAULT_BROWSER_ARGS: &[&str] = &["--no-sandbox"];

/// Live browser session driven over the WebDriver protocol
pub struct WebDriverSession {
    driver: WebDriver,
    poll_interval: Duration,
}

impl WebDriverSession {
    /// Starts a new browser session on the configured WebDriver server
    ///
    /// # Arguments
    ///
    /// * `config` - Browser settings (server URL, headless flag, extra args)
    /// * `poll_interval` - Delay between element lookups while waiting
    ///
    /// # Returns
    ///
    /// * `Ok(WebDriverSession)` - Session is open and ready to navigate
    /// * `Err(SessionError::Connect)` - Capabilities were rejected or the
    ///   server could not be reached
    pub async fn connect(config: &BrowserConfig, poll_interval: Duration) -> SessionResult<Self> {
        let mut caps = DesiredCapabilities::chrome();

        for arg in browser_args(config) {
            caps.add_arg(&arg)
                .map_err(|e| SessionError::Connect(format!("invalid browser arg '{}': {}", arg, e)))?;
        }

        tracing::debug!("Connecting to WebDriver at {}", config.webdriver_url);
        let driver = WebDriver::new(config.webdriver_url.as_str(), caps)
            .await
            .map_err(|e| SessionError::Connect(format!("{}: {}", config.webdriver_url, e)))?;

        Ok(Self {
            driver,
            poll_interval,
        })
    }
}

/// Builds the browser argument list for a session
///
/// `--no-sandbox` is always present, `--headless` is added when requested
/// unless a headless variant was already supplied, and configured extra
/// arguments follow in order.
pub fn browser_args(config: &BrowserConfig) -> Vec<String> {
    let mut args: Vec<String> = DEFAULT_BROWSER_ARGS.iter().map(|a| a.to_string()).collect();

    for arg in &config.browser_args {
        if !args.contains(arg) {
            args.push(arg.clone());
        }
    }

    if config.headless && !args.iter().any(|a| a.contains("headless")) {
        args.push("--headless".to_string());
    }

    args
}

impl From<WebDriverError> for SessionError {
    fn from(e: WebDriverError) -> Self {
        SessionError::Command(e.to_string())
    }
}

#[async_trait::async_trait]
impl Session for WebDriverSession {
    type Control = WebElement;

    async fn navigate(&self, url: &str) -> SessionResult<()> {
        self.driver.goto(url).await?;
        Ok(())
    }

    async fn current_content(&self) -> SessionResult<String> {
        Ok(self.driver.source().await?)
    }

    async fn find_clickable(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> SessionResult<Option<WebElement>> {
        let deadline = Instant::now() + timeout;

        let element = self
            .driver
            .query(By::Css(selector))
            .wait(timeout, self.poll_interval)
            .first_opt()
            .await?;

        let Some(element) = element else {
            return Ok(None);
        };

        let remaining = deadline.saturating_duration_since(Instant::now());
        match element
            .wait_until()
            .wait(remaining.max(self.poll_interval), self.poll_interval)
            .clickable()
            .await
        {
            Ok(()) => Ok(Some(element)),
            Err(e) => {
                tracing::debug!("'{}' present but not clickable: {}", selector, e);
                Ok(None)
            }
        }
    }

    async fn click(&self, control: WebElement) -> SessionResult<()> {
        control.click().await?;
        Ok(())
    }

    async fn close(self) -> SessionResult<()> {
        self.driver.quit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(headless: bool, extra: &[&str]) -> BrowserConfig {
        BrowserConfig {
            headless,
            browser_args: extra.iter().map(|a| a.to_string()).collect(),
            ..BrowserConfig::default()
        }
    }

    #[test]
    fn test_headless_args() {
        let args = browser_args(&config(true, &[]));
        assert_eq!(args, vec!["--no-sandbox", "--headless"]);
    }

    #[test]
    fn test_headed_args() {
        let args = browser_args(&config(false, &[]));
        assert_eq!(args, vec!["--no-sandbox"]);
    }

    #[test]
    fn test_custom_headless_variant_not_duplicated() {
        let args = browser_args(&config(true, &["--headless=new"]));
        assert_eq!(args, vec!["--no-sandbox", "--headless=new"]);
    }

    #[test]
    fn test_extra_args_keep_order_without_duplicates() {
        let args = browser_args(&config(false, &["--lang=en", "--no-sandbox", "--mute-audio"]));
        assert_eq!(args, vec!["--no-sandbox", "--lang=en", "--mute-audio"]);
    }
}
