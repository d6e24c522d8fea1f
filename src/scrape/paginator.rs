//! Pagination driver
//!
//! Owns the browser session for one run and moves it through the session state
//! machine: load the listing, dismiss the consent dialog, wait for the table,
//! then read and advance page by page until closed.

use crate::config::TimeoutConfig;
use crate::session::Session;
use crate::state::{ConsentOutcome, SessionState};
use crate::stats::StatKind;
use crate::{ScraperError, SessionError, SessionResult};
use sha2::{Digest, Sha256};
use std::time::Duration;
use tokio::time::Instant;

/// Opens the cookie preferences panel
pub const CONSENT_PREFERENCES: &str = "#onetrust-pc-btn-handler";

/// Accepts the recommended cookie settings inside the preferences panel
pub const CONSENT_ACCEPT: &str = "#accept-recommended-btn-handler";

pub const NEXT_PAGE: &str = ".paginationNextContainer";

/// Result of a bounded wait on page content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    /// The awaited condition was observed
    Ready,

    /// The wait expired first
    TimedOut,
}

/// Builds the leaderboard URL for `kind`
///
/// # Example
///
/// ```
/// use pl_stats_scraper::scrape::build_url;
/// use pl_stats_scraper::StatKind;
///
/// assert_eq!(
///     build_url("https://www.premierleague.com/stats/top/players/", StatKind::Tackles),
///     "https://www.premierleague.com/stats/top/players/total_tackle?se=-1"
/// );
/// ```
pub fn build_url(base_url: &str, kind: StatKind) -> String {
    format!("{}{}", base_url, kind.url_suffix())
}

/// Hex-encoded SHA-256 digest of page markup, used to detect page changes
pub fn content_digest(html: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(html.as_bytes());
    hex::encode(hasher.finalize())
}

/// Drives one session through a paginated listing
pub struct Paginator<S: Session> {
    session: S,
    state: SessionState,
    timeouts: TimeoutConfig,
    page: u32,
    advances: u32,
}

impl<S: Session> Paginator<S> {
    pub fn new(session: S, timeouts: TimeoutConfig) -> Self {
        Self {
            session,
            state: SessionState::Unstarted,
            timeouts,
            page: 1,
            advances: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// 1-based number of the page the session is currently showing
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Number of successful next-page clicks so far
    pub fn advances(&self) -> u32 {
        self.advances
    }

    /// Navigates to the listing URL
    pub async fn load(&mut self, url: &str) -> Result<(), ScraperError> {
        tracing::debug!("Navigating to {}", url);
        self.session
            .navigate(url)
            .await
            .map_err(|source| ScraperError::Navigation {
                url: url.to_string(),
                source,
            })?;

        self.state.transition(SessionState::Loaded)
    }

    /// Best-effort dismissal of the cookie-consent dialog
    ///
    /// Driver failures during the attempt are logged and reported as
    /// `ConsentOutcome::TimedOut`; only an out-of-order call is an error.
    pub async fn dismiss_consent(&mut self) -> Result<ConsentOutcome, ScraperError> {
        let outcome = match self.try_dismiss_consent().await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Cookie consent dialog could not be completed: {}", e);
                ConsentOutcome::TimedOut
            }
        };

        tracing::info!("Cookie consent: {}", outcome);

        if outcome.is_handled() {
            self.state.transition(SessionState::ConsentHandled)?;
        }

        Ok(outcome)
    }

    async fn try_dismiss_consent(&self) -> SessionResult<ConsentOutcome> {
        let timeout = self.timeouts.consent();

        let Some(preferences) = self
            .session
            .find_clickable(CONSENT_PREFERENCES, timeout)
            .await?
        else {
            return Ok(ConsentOutcome::NotPresent);
        };
        self.session.click(preferences).await?;

        let Some(accept) = self.session.find_clickable(CONSENT_ACCEPT, timeout).await? else {
            return Ok(ConsentOutcome::TimedOut);
        };
        self.session.click(accept).await?;

        Ok(ConsentOutcome::Handled)
    }

    /// Waits until `ready` holds for the rendered markup, bounded by the
    /// table-ready timeout, and marks the first page as ready either way
    pub async fn wait_until_ready<F>(&mut self, ready: F) -> Result<SettleOutcome, ScraperError>
    where
        F: FnMut(&str) -> bool,
    {
        let outcome = self.poll_content(self.timeouts.table_ready(), ready).await?;
        self.state.transition(SessionState::PageReady)?;
        Ok(outcome)
    }

    /// Returns the markup of the current page
    pub async fn current_page_content(&self) -> Result<String, ScraperError> {
        if self.state != SessionState::PageReady {
            return Err(ScraperError::InvalidTransition {
                from: self.state,
                to: SessionState::PageReady,
            });
        }

        Ok(self.session.current_content().await?)
    }

    /// Clicks the next-page control and waits for the content to change
    ///
    /// # Returns
    ///
    /// * `Ok(SettleOutcome::Ready)` - The next page rendered
    /// * `Ok(SettleOutcome::TimedOut)` - Clicked, but the content did not change
    ///   within the settle timeout
    /// * `Err(ScraperError::Pagination)` - No clickable next-page control
    ///   appeared, or the driver failed
    pub async fn advance_page(&mut self) -> Result<SettleOutcome, ScraperError> {
        let page = self.page;
        let outcome = self
            .try_advance()
            .await
            .map_err(|source| ScraperError::Pagination { page, source })?;

        self.page += 1;
        self.advances += 1;
        self.state.transition(SessionState::PageReady)?;

        if outcome == SettleOutcome::TimedOut {
            tracing::warn!(
                "Page {} did not change within {:?} of clicking next",
                self.page,
                self.timeouts.settle()
            );
        }

        Ok(outcome)
    }

    async fn try_advance(&self) -> SessionResult<SettleOutcome> {
        let before = content_digest(&self.session.current_content().await?);
        let timeout = self.timeouts.next_page();

        let next = self
            .session
            .find_clickable(NEXT_PAGE, timeout)
            .await?
            .ok_or_else(|| SessionError::ElementNotFound {
                selector: NEXT_PAGE.to_string(),
                timeout,
            })?;
        self.session.click(next).await?;

        self.poll_content(self.timeouts.settle(), |html| {
            content_digest(html) != before
        })
        .await
    }

    /// Polls the rendered markup until `done` holds or `timeout` expires
    async fn poll_content<F>(&self, timeout: Duration, mut done: F) -> SessionResult<SettleOutcome>
    where
        F: FnMut(&str) -> bool,
    {
        let deadline = Instant::now() + timeout;

        loop {
            let html = self.session.current_content().await?;
            if done(&html) {
                return Ok(SettleOutcome::Ready);
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(SettleOutcome::TimedOut);
            }

            tokio::time::sleep(self.timeouts.poll_interval().min(deadline - now)).await;
        }
    }

    /// Releases the session
    ///
    /// The session is closed before the state moves to `Closed`, so the
    /// browser is released even if the state machine reports a problem.
    pub async fn close(mut self) -> Result<(), ScraperError> {
        let closed = self.session.close().await;
        self.state.transition(SessionState::Closed)?;
        closed.map_err(ScraperError::Session)
    }
}
