use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single text-extraction request.
///
/// Every failure falls into exactly one of these kinds; none are retried.
#[derive(Error, Debug)]
pub enum PagetextError {
    /// The outbound request could not be completed (DNS, connect, TLS,
    /// timeout, malformed URL, or a broken body stream).
    #[error("Error fetching data from {url}: {cause}")]
    Fetch { url: String, cause: String },
    /// The target answered with a non-2xx status (redirects included).
    #[error("HTTP error: {} for URL: {url}", .status.as_u16())]
    UpstreamStatus { url: String, status: StatusCode },
    #[error("{0}")]
    Internal(String),
}

impl PagetextError {
    /// Build a fetch error, flattening the reqwest source chain into the cause.
    pub fn fetch(url: &str, err: &reqwest::Error) -> Self {
        PagetextError::Fetch {
            url: url.to_string(),
            cause: describe(err),
        }
    }

    /// Status the caller should see for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            PagetextError::Fetch { .. } => StatusCode::BAD_REQUEST,
            PagetextError::UpstreamStatus { status, .. } => *status,
            PagetextError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// reqwest's top-level message is terse ("error sending request for url");
/// the useful part (connection refused, dns error) lives in the sources.
fn describe(err: &(dyn std::error::Error + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(inner) = source {
        let msg = inner.to_string();
        if !parts.iter().any(|p| p.contains(&msg)) {
            parts.push(msg);
        }
        source = inner.source();
    }
    parts.join(": ")
}
