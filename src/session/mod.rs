//! Browser session boundary
//!
//! The scraper only ever talks to a browser through the `Session` trait. The
//! production implementation drives a W3C WebDriver server via `thirtyfour`;
//! tests substitute a scripted in-memory session.

mod webdriver;

pub use webdriver::{browser_args, WebDriverSession};

use crate::SessionResult;
use std::time::Duration;

/// One browser-automation navigation context, exclusively owned by a run
///
/// Implementations must keep every command bounded: `find_clickable` waits at
/// most `timeout` and reports absence as `Ok(None)` rather than an error.
#[async_trait::async_trait]
pub trait Session: Send + Sync + Sized {
    /// Handle to an element that can be clicked
    type Control: Send;

    /// Loads `url` in the session
    async fn navigate(&self, url: &str) -> SessionResult<()>;

    /// Returns the currently rendered markup
    async fn current_content(&self) -> SessionResult<String>;

    /// Waits up to `timeout` for an element matching the CSS `selector` to
    /// become clickable
    async fn find_clickable(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> SessionResult<Option<Self::Control>>;

    async fn click(&self, control: Self::Control) -> SessionResult<()>;

    /// Releases the session; consuming `self` makes a second close impossible
    async fn close(self) -> SessionResult<()>;
}
