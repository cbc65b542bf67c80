//! Fetch a web page over HTTP and reduce it to its visible text.
//!
//! The flow is a single straight line: [`fetch::fetch_page`] performs the
//! outbound GET and classifies transport and status failures, then
//! [`extract::extract_text`] parses the body as HTML and joins the trimmed
//! text nodes. [`fetch::fetch_text`] runs both.

use std::time::Duration;

pub mod config_file;
pub mod error;
pub mod extract;
pub mod fetch;

// Re-export for convenience
pub use error::PagetextError;
pub use extract::{extract_text, has_body_tag};
pub use fetch::{build_client, fetch_page, fetch_text};

/// Default whole-request timeout for outbound fetches.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings for the outbound HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// `None` disables the client timeout entirely.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: default_user_agent(),
        }
    }
}

/// `pagetext/<version>`.
pub fn default_user_agent() -> String {
    format!("pagetext/{}", env!("CARGO_PKG_VERSION"))
}
