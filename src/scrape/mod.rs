//! Scrape module - the page-by-page leaderboard loop
//!
//! - `extractor`: markup → `PlayerStatRecord`s
//! - `paginator`: session navigation, consent handling, next-page clicks
//! - `coordinator`: composes the two for one run

mod coordinator;
mod extractor;
mod paginator;

pub use coordinator::{Coordinator, ScrapeOutcome};
pub use extractor::{extract_rows, ExtractedPage, RowExtractor, RowSkip};
pub use paginator::{
    build_url, content_digest, Paginator, SettleOutcome, CONSENT_ACCEPT, CONSENT_PREFERENCES,
    NEXT_PAGE,
};
