use std::fmt;

/// Result of trying to dismiss the cookie-consent dialog
///
/// None of these outcomes abort a scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsentOutcome {
    /// Both the preferences and the accept controls were clicked
    Handled,

    /// The preferences control never appeared
    NotPresent,

    /// The dialog opened but could not be completed in time
    TimedOut,
}

impl ConsentOutcome {
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Handled => "handled",
            Self::NotPresent => "not_present",
            Self::TimedOut => "timed_out",
        }
    }
}

impl fmt::Display for ConsentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
