//! Leaderboard row extraction
//!
//! Turns one rendered leaderboard page into `PlayerStatRecord`s. Extraction is
//! a pure function of the markup and the configured `StatKind`.

use crate::stats::{PlayerStatRecord, StatKind};
use crate::ScraperError;
use scraper::{ElementRef, Html, Selector};
use std::fmt;

/// Body of the leaderboard table
pub const TABLE_BODY: &str = "tbody.stats-table__container";

/// One ranked row
pub const ROW: &str = "tr.table__row";

pub const RANK_CELL: &str = "td.stats-table__rank";

/// Player name anchor, also carrying the profile link
pub const PLAYER_LINK: &str = "a.playerName";

pub const NATIONALITY: &str = "span.playerCountry";

pub const CLUB: &str = "a.stats-table__cell-icon-align";

/// Why a row was left out of the results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSkip {
    /// No rank cell, or its text is not a positive integer
    MissingRank,

    /// No player anchor, or its text is empty
    MissingName,

    /// No cell for the selected statistic
    MissingStat,
}

impl fmt::Display for RowSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRank => write!(f, "missing rank"),
            Self::MissingName => write!(f, "missing player name"),
            Self::MissingStat => write!(f, "missing stat value"),
        }
    }
}

/// Records read from one page plus the rows that had to be dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPage {
    pub records: Vec<PlayerStatRecord>,
    pub skipped: Vec<RowSkip>,

    /// False when the table body marker was absent
    pub table_found: bool,
}

/// Compiled selectors for one leaderboard kind
#[derive(Debug)]
pub struct RowExtractor {
    kind: StatKind,
    table_body: Selector,
    row: Selector,
    rank: Selector,
    player: Selector,
    nationality: Selector,
    value: Selector,
    club: Selector,
}

impl RowExtractor {
    /// Compiles the row markers for `kind`
    ///
    /// # Returns
    ///
    /// * `Ok(RowExtractor)` - All markers compiled
    /// * `Err(ScraperError::Selector)` - A marker is not a valid CSS selector
    pub fn new(kind: StatKind) -> Result<Self, ScraperError> {
        Ok(Self {
            kind,
            table_body: compile(TABLE_BODY)?,
            row: compile(ROW)?,
            rank: compile(RANK_CELL)?,
            player: compile(PLAYER_LINK)?,
            nationality: compile(NATIONALITY)?,
            value: compile(kind.value_column())?,
            club: compile(CLUB)?,
        })
    }

    pub fn kind(&self) -> StatKind {
        self.kind
    }

    /// Returns true if the page already contains the leaderboard table body
    pub fn has_table(&self, html: &str) -> bool {
        Html::parse_document(html)
            .select(&self.table_body)
            .next()
            .is_some()
    }

    /// Extracts every well-formed row from a page
    ///
    /// Returns an empty vector when the table body is absent, e.g. while the
    /// page is still loading or was blocked.
    pub fn extract_rows(&self, html: &str) -> Vec<PlayerStatRecord> {
        self.extract_page(html).records
    }

    /// Extracts a page, keeping track of rows that were dropped
    pub fn extract_page(&self, html: &str) -> ExtractedPage {
        let document = Html::parse_document(html);

        let Some(body) = document.select(&self.table_body).next() else {
            return ExtractedPage::default();
        };

        let mut page = ExtractedPage {
            table_found: true,
            ..ExtractedPage::default()
        };

        for (index, row) in body.select(&self.row).enumerate() {
            match self.extract_row(row) {
                Ok(record) => page.records.push(record),
                Err(skip) => {
                    tracing::debug!("Skipping row {}: {}", index + 1, skip);
                    page.skipped.push(skip);
                }
            }
        }

        page
    }

    fn extract_row(&self, row: ElementRef<'_>) -> Result<PlayerStatRecord, RowSkip> {
        let rank = first_text(row, &self.rank)
            .and_then(|text| parse_rank(&text))
            .ok_or(RowSkip::MissingRank)?;

        let player = row.select(&self.player).next().ok_or(RowSkip::MissingName)?;
        let name = element_text(player);
        if name.is_empty() {
            return Err(RowSkip::MissingName);
        }
        let link = player.value().attr("href").unwrap_or_default();

        let nationality = first_text(row, &self.nationality);
        let stat_value = first_text(row, &self.value).ok_or(RowSkip::MissingStat)?;
        let club = first_text(row, &self.club);

        Ok(PlayerStatRecord::new(
            rank,
            name,
            nationality,
            club,
            stat_value,
            link,
        ))
    }
}

/// Convenience wrapper compiling an extractor for a single page
///
/// # Example
///
/// ```
/// use pl_stats_scraper::{extract_rows, StatKind};
///
/// let rows = extract_rows("<html><body>Loading...</body></html>", StatKind::Tackles).unwrap();
/// assert!(rows.is_empty());
/// ```
pub fn extract_rows(html: &str, kind: StatKind) -> Result<Vec<PlayerStatRecord>, ScraperError> {
    Ok(RowExtractor::new(kind)?.extract_rows(html))
}

fn compile(selector: &str) -> Result<Selector, ScraperError> {
    Selector::parse(selector).map_err(|e| ScraperError::Selector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Text of the first match of `selector` under `row`, if present
fn first_text(row: ElementRef<'_>, selector: &Selector) -> Option<String> {
    row.select(selector).next().map(element_text)
}

/// Element text with whitespace runs collapsed and ends trimmed
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses a displayed rank such as `"7"` or `"7."`
fn parse_rank(text: &str) -> Option<u32> {
    text.trim()
        .trim_end_matches('.')
        .parse::<u32>()
        .ok()
        .filter(|rank| *rank > 0)
}
