use serde::Serialize;

/// Nationality recorded when a row has no country marker
pub const UNKNOWN_NATIONALITY: &str = "Unknown";

/// Club recorded when a row has no club marker
pub const UNKNOWN_CLUB: &str = "Retired/Unknown";

/// One ranked entry on a leaderboard page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerStatRecord {
    /// Rank as displayed (ties may repeat, gaps are allowed)
    pub rank: u32,

    /// Player name, never empty
    pub name: String,

    pub nationality: String,

    pub club: String,

    /// Statistic value exactly as displayed
    pub stat_value: String,

    /// Profile link with any leading `//` removed
    pub profile_link: String,
}

impl PlayerStatRecord {
    /// Builds a record, substituting the defaults for absent optional fields
    pub fn new(
        rank: u32,
        name: impl Into<String>,
        nationality: Option<String>,
        club: Option<String>,
        stat_value: impl Into<String>,
        profile_link: &str,
    ) -> Self {
        Self {
            rank,
            name: name.into(),
            nationality: nationality.unwrap_or_else(|| UNKNOWN_NATIONALITY.to_string()),
            club: club.unwrap_or_else(|| UNKNOWN_CLUB.to_string()),
            stat_value: stat_value.into(),
            profile_link: normalize_profile_link(profile_link),
        }
    }
}

/// Strips the protocol-relative `//` marker from a profile link
///
/// # Examples
///
/// ```
/// use pl_stats_scraper::stats::normalize_profile_link;
///
/// assert_eq!(normalize_profile_link("//example.com/x"), "example.com/x");
/// assert_eq!(normalize_profile_link("/players/1/overview"), "/players/1/overview");
/// ```
pub fn normalize_profile_link(href: &str) -> String {
    let href = href.trim();
    href.strip_prefix("//").unwrap_or(href).to_string()
}
