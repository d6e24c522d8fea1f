//! Statistic catalogue and record types
//!
//! - `StatKind`: the closed set of leaderboards that can be scraped, backed by
//!   a fixed lookup table of URL suffixes and value-column markers
//! - `PlayerStatRecord`: one ranked row read from a leaderboard page

mod kind;
mod record;

pub use kind::{validate_stat_table, StatEntry, StatKind, MAIN_STAT_COLUMN, STAT_TABLE};
pub use record::{normalize_profile_link, PlayerStatRecord, UNKNOWN_CLUB, UNKNOWN_NATIONALITY};
