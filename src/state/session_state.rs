/// Session state definitions for tracking scrape progress
///
/// A session moves `Unstarted → Loaded → (ConsentHandled) → PageReady`, stays in
/// `PageReady` while paginating, and always ends in `Closed`.
use crate::ScraperError;
use std::fmt;

/// Represents the current state of the browser session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Session acquired, nothing loaded yet
    Unstarted,

    /// Listing URL has been navigated to
    Loaded,

    /// Cookie-consent dialog was dismissed
    ConsentHandled,

    /// Leaderboard content is ready to be read
    PageReady,

    /// Session released; no further commands allowed
    Closed,
}

impl SessionState {
    /// Returns true once the session has been released
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Returns true if the state machine allows moving from `self` to `next`
    ///
    /// `Closed` is reachable from every non-terminal state so the session can
    /// be released on any exit path.
    pub fn can_transition_to(&self, next: SessionState) -> bool {
        use SessionState::*;

        matches!(
            (self, next),
            (Unstarted, Loaded)
                | (Loaded, ConsentHandled)
                | (Loaded, PageReady)
                | (ConsentHandled, PageReady)
                | (PageReady, PageReady)
                | (Unstarted | Loaded | ConsentHandled | PageReady, Closed)
        )
    }

    /// Moves to `next`, or fails with `ScraperError::InvalidTransition`
    pub fn transition(&mut self, next: SessionState) -> Result<(), ScraperError> {
        if !self.can_transition_to(next) {
            return Err(ScraperError::InvalidTransition {
                from: *self,
                to: next,
            });
        }

        tracing::trace!("Session state {} -> {}", self, next);
        *self = next;
        Ok(())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unstarted => "unstarted",
            Self::Loaded => "loaded",
            Self::ConsentHandled => "consent_handled",
            Self::PageReady => "page_ready",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
