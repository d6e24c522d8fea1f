//! Scrape coordinator - composes pagination and row extraction
//!
//! One call to `Coordinator::run` owns one browser session from start to
//! finish:
//! - navigating to the selected leaderboard
//! - dismissing the cookie dialog
//! - reading and extracting `page_count` pages
//! - closing the session on every exit path

use crate::config::{validate_timeouts, Config, TimeoutConfig};
use crate::scrape::extractor::RowExtractor;
use crate::scrape::paginator::{build_url, Paginator, SettleOutcome};
use crate::session::Session;
use crate::state::ConsentOutcome;
use crate::stats::{validate_stat_table, PlayerStatRecord, StatKind};
use crate::ScraperError;

/// Everything a run produced, including records read before a failure
#[derive(Debug)]
pub struct ScrapeOutcome {
    pub kind: StatKind,

    /// Requested page budget
    pub page_count: u32,

    /// Records in page order
    pub records: Vec<PlayerStatRecord>,

    /// Pages whose content was read
    pub pages_read: u32,

    /// Successful next-page clicks
    pub advances: u32,

    /// Rows dropped for missing required fields
    pub rows_skipped: usize,

    /// Consent outcome, if the listing was loaded
    pub consent: Option<ConsentOutcome>,

    /// The fatal error that ended the run early, if any
    pub error: Option<ScraperError>,
}

impl ScrapeOutcome {
    fn new(kind: StatKind, page_count: u32) -> Self {
        Self {
            kind,
            page_count,
            records: Vec::new(),
            pages_read: 0,
            advances: 0,
            rows_skipped: 0,
            consent: None,
            error: None,
        }
    }

    /// Returns true if the run finished without a fatal error
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// All-or-nothing view: records on success, the error otherwise
    pub fn into_result(self) -> Result<Vec<PlayerStatRecord>, ScraperError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.records),
        }
    }
}

/// Runs scrapes against one base listing URL
#[derive(Debug, Clone)]
pub struct Coordinator {
    base_url: String,
    timeouts: TimeoutConfig,
}

impl Coordinator {
    /// Creates a coordinator
    ///
    /// Fails fast if the stat lookup table is incomplete or the timeouts
    /// are unusable (zero, or shorter than the poll interval).
    pub fn new(base_url: impl Into<String>, timeouts: TimeoutConfig) -> Result<Self, ScraperError> {
        validate_stat_table()?;
        validate_timeouts(&timeouts)?;

        Ok(Self {
            base_url: base_url.into(),
            timeouts,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ScraperError> {
        Self::new(config.scraper.base_url.clone(), config.timeouts.clone())
    }

    /// Returns the leaderboard URL that `run` navigates to for `kind`
    pub fn url_for(&self, kind: StatKind) -> String {
        build_url(&self.base_url, kind)
    }

    /// Scrapes `page_count` pages, discarding partial results on failure
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<PlayerStatRecord>)` - Records from every page, in order
    /// * `Err(ScraperError)` - Navigation or pagination failed; the session
    ///   has already been closed
    pub async fn scrape<S: Session>(
        &self,
        session: S,
        kind: StatKind,
        page_count: u32,
    ) -> Result<Vec<PlayerStatRecord>, ScraperError> {
        self.run(session, kind, page_count).await.into_result()
    }

    /// Scrapes `page_count` pages and reports everything gathered
    ///
    /// The session is closed exactly once whatever happens. A failure to
    /// advance past the final requested page is logged and tolerated, since no
    /// further content is needed.
    pub async fn run<S: Session>(&self, session: S, kind: StatKind, page_count: u32) -> ScrapeOutcome {
        let mut outcome = ScrapeOutcome::new(kind, page_count);
        let mut paginator = Paginator::new(session, self.timeouts.clone());

        let result = match RowExtractor::new(kind) {
            Ok(extractor) => {
                self.drive(&mut paginator, &extractor, &mut outcome)
                    .await
            }
            Err(e) => Err(e),
        };
        outcome.advances = paginator.advances();

        if let Err(e) = paginator.close().await {
            tracing::warn!("Failed to close browser session: {}", e);
        }

        match result {
            Ok(()) => tracing::info!(
                "Scraped {} {} records from {} pages",
                outcome.records.len(),
                kind,
                outcome.pages_read
            ),
            Err(e) => {
                tracing::error!(
                    "Scrape of {} aborted after {} pages: {}",
                    kind,
                    outcome.pages_read,
                    e
                );
                outcome.error = Some(e);
            }
        }

        outcome
    }

    async fn drive<S: Session>(
        &self,
        paginator: &mut Paginator<S>,
        extractor: &RowExtractor,
        outcome: &mut ScrapeOutcome,
    ) -> Result<(), ScraperError> {
        let url = self.url_for(outcome.kind);
        tracing::info!(
            "Scraping {} pages of {} from {}",
            outcome.page_count,
            outcome.kind,
            url
        );

        paginator.load(&url).await?;
        outcome.consent = Some(paginator.dismiss_consent().await?);

        if paginator
            .wait_until_ready(|html| extractor.has_table(html))
            .await?
            == SettleOutcome::TimedOut
        {
            tracing::warn!("Leaderboard table did not appear on {}", url);
        }

        for page in 1..=outcome.page_count {
            let html = paginator.current_page_content().await?;
            let extracted = extractor.extract_page(&html);

            if !extracted.table_found {
                tracing::warn!("Page {}: leaderboard table not found", page);
            }
            tracing::info!(
                "Page {}: {} rows extracted, {} dropped",
                page,
                extracted.records.len(),
                extracted.skipped.len()
            );

            outcome.records.extend(extracted.records);
            outcome.rows_skipped += extracted.skipped.len();
            outcome.pages_read = page;

            match paginator.advance_page().await {
                Ok(_) => {}
                Err(e) if page == outcome.page_count => {
                    tracing::debug!("No page after final page {}: {}", page, e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }
}
