//! State module for tracking a scrape session
//!
//! # Components
//!
//! - `SessionState`: lifecycle of the browser session driven by one run
//! - `ConsentOutcome`: result of the best-effort cookie-consent step

mod consent;
mod session_state;

// Re-export main types
pub use consent::ConsentOutcome;
pub use session_state::SessionState;
