use pagetext_core::{FetchConfig, build_client};

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(fetch: &FetchConfig) -> reqwest::Result<Self> {
        Ok(Self {
            client: build_client(fetch)?,
        })
    }
}
