//! Output module for presenting scraped leaderboards
//!
//! This module handles:
//! - Rendering records as a bordered text table, markdown, or JSON
//! - Writing the rendered report to stdout or a file

mod json;
mod markdown;
mod table;

pub use json::format_json;
pub use markdown::format_markdown;
pub use table::format_table;

use crate::stats::{PlayerStatRecord, StatKind};
use crate::OutputError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

/// Rows shown on one leaderboard page
pub const ROWS_PER_PAGE: u32 = 10;

/// Column headers shared by the table and markdown renderers
pub const COLUMNS: [&str; 6] = [
    "Rank",
    "Player Name",
    "Nationality",
    "Club",
    "Stat",
    "Player Link",
];

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Supported report formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Markdown,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Markdown => "markdown",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown output format '{}' (expected table, markdown or json)",
                other
            )),
        }
    }
}

/// Records of one run together with the parameters that produced them
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeReport {
    pub kind: StatKind,
    pub page_count: u32,
    pub scraped_at: DateTime<Utc>,
    pub records: Vec<PlayerStatRecord>,
}

impl ScrapeReport {
    pub fn new(kind: StatKind, page_count: u32, records: Vec<PlayerStatRecord>) -> Self {
        Self {
            kind,
            page_count,
            scraped_at: Utc::now(),
            records,
        }
    }

    /// Heading printed above the table, e.g. "Top 30 total_tackle in the Premier League"
    pub fn title(&self) -> String {
        format!(
            "Top {} {} in the Premier League",
            u64::from(self.page_count) * u64::from(ROWS_PER_PAGE),
            self.kind.label()
        )
    }

    /// One row of cell values in `COLUMNS` order
    pub(crate) fn cells(record: &PlayerStatRecord) -> [String; 6] {
        [
            record.rank.to_string(),
            record.name.clone(),
            record.nationality.clone(),
            record.club.clone(),
            record.stat_value.clone(),
            record.profile_link.clone(),
        ]
    }
}

/// Renders a report in the requested format
pub fn render(report: &ScrapeReport, format: OutputFormat) -> OutputResult<String> {
    match format {
        OutputFormat::Table => Ok(format_table(report)),
        OutputFormat::Markdown => Ok(format_markdown(report)),
        OutputFormat::Json => format_json(report),
    }
}

/// Renders a report and writes it to `path`, or to stdout when `path` is `None`
pub fn write_report(
    report: &ScrapeReport,
    format: OutputFormat,
    path: Option<&Path>,
) -> OutputResult<()> {
    let rendered = render(report, format)?;

    match path {
        Some(path) => {
            std::fs::write(path, rendered.as_bytes())?;
            tracing::info!("Wrote {} report to {}", format, path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(rendered.as_bytes())?;
            handle.flush()?;
        }
    }

    Ok(())
}
