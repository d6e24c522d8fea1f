/// Leaderboard definitions
///
/// Every `StatKind` owns exactly one row of `STAT_TABLE`, placed at the index of
/// its discriminant. `validate_stat_table` checks that layout at startup.
use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cell marker of the highlighted statistic column on every leaderboard
pub const MAIN_STAT_COLUMN: &str = "td.stats-table__main-stat";

/// Identifies which leaderboard is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatKind {
    /// Total league appearances
    Appearances,

    /// Total tackles
    Tackles,

    /// Goals scored
    Goals,

    /// Goal assists
    Assists,

    /// Clean sheets kept
    CleanSheets,
}

/// One row of the leaderboard lookup table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatEntry {
    /// The kind this entry describes
    pub kind: StatKind,

    /// Identifier the site uses for this statistic
    pub slug: &'static str,

    /// Appended to the base listing URL
    pub url_suffix: &'static str,

    /// CSS marker of the cell holding the statistic value
    pub value_column: &'static str,

    /// Human-readable name used in report titles
    pub label: &'static str,
}

/// Fixed lookup table, indexed by `StatKind` discriminant
pub const STAT_TABLE: [StatEntry; StatKind::COUNT] = [
    StatEntry {
        kind: StatKind::Appearances,
        slug: "appearances",
        url_suffix: "appearances?se=-1",
        value_column: MAIN_STAT_COLUMN,
        label: "appearances",
    },
    StatEntry {
        kind: StatKind::Tackles,
        slug: "total_tackle",
        url_suffix: "total_tackle?se=-1",
        value_column: MAIN_STAT_COLUMN,
        label: "total_tackle",
    },
    StatEntry {
        kind: StatKind::Goals,
        slug: "goals",
        url_suffix: "goals?se=-1",
        value_column: MAIN_STAT_COLUMN,
        label: "goals",
    },
    StatEntry {
        kind: StatKind::Assists,
        slug: "goal_assist",
        url_suffix: "goal_assist?se=-1",
        value_column: MAIN_STAT_COLUMN,
        label: "goal_assist",
    },
    StatEntry {
        kind: StatKind::CleanSheets,
        slug: "clean_sheet",
        url_suffix: "clean_sheet?se=-1",
        value_column: MAIN_STAT_COLUMN,
        label: "clean_sheet",
    },
];

impl StatKind {
    /// Number of leaderboard kinds
    pub const COUNT: usize = 5;

    /// Every kind, in table order
    pub const ALL: [StatKind; StatKind::COUNT] = [
        Self::Appearances,
        Self::Tackles,
        Self::Goals,
        Self::Assists,
        Self::CleanSheets,
    ];

    /// Returns the command-line name of this kind
    pub fn name(&self) -> &'static str {
        match self {
            Self::Appearances => "appearances",
            Self::Tackles => "tackles",
            Self::Goals => "goals",
            Self::Assists => "assists",
            Self::CleanSheets => "clean-sheets",
        }
    }

    /// Returns this kind's lookup table entry
    pub fn entry(&self) -> &'static StatEntry {
        &STAT_TABLE[*self as usize]
    }

    pub fn url_suffix(&self) -> &'static str {
        self.entry().url_suffix
    }

    pub fn value_column(&self) -> &'static str {
        self.entry().value_column
    }

    pub fn label(&self) -> &'static str {
        self.entry().label
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for StatKind {
    type Err = ConfigError;

    /// Accepts either the command-line name (`tackles`) or the site slug
    /// (`total_tackle`), case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == wanted || kind.entry().slug == wanted)
            .ok_or_else(|| ConfigError::UnknownStat(s.to_string()))
    }
}

/// Checks that every kind has exactly one well-formed table entry
///
/// Called once at startup so a missing or misplaced mapping fails before any
/// browser session is opened.
pub fn validate_stat_table() -> Result<(), ConfigError> {
    for (index, kind) in StatKind::ALL.iter().enumerate() {
        if *kind as usize != index {
            return Err(ConfigError::Validation(format!(
                "StatKind::{:?} is listed out of order in StatKind::ALL",
                kind
            )));
        }

        let entry = &STAT_TABLE[index];
        if entry.kind != *kind {
            return Err(ConfigError::Validation(format!(
                "stat table slot {} holds {:?}, expected {:?}",
                index, entry.kind, kind
            )));
        }

        if entry.url_suffix.is_empty() || entry.value_column.is_empty() {
            return Err(ConfigError::Validation(format!(
                "stat table entry for {:?} is incomplete",
                kind
            )));
        }

        if entry.url_suffix.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "URL suffix for {:?} must be relative, got '{}'",
                kind, entry.url_suffix
            )));
        }
    }

    for (i, a) in STAT_TABLE.iter().enumerate() {
        if STAT_TABLE[i + 1..].iter().any(|b| b.slug == a.slug) {
            return Err(ConfigError::Validation(format!(
                "duplicate stat slug '{}'",
                a.slug
            )));
        }
    }

    Ok(())
}
