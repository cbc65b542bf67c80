//! Outbound GET with failure classification.

use reqwest::Client;
use reqwest::redirect::Policy;

use crate::error::PagetextError;
use crate::extract::extract_text;
use crate::FetchConfig;

/// Build the shared outbound client from `config`.
///
/// Redirects are not followed: one request per fetch, and a 3xx answer is
/// reported to the caller like any other non-2xx status.
pub fn build_client(config: &FetchConfig) -> reqwest::Result<Client> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.as_str())
        .redirect(Policy::none());
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// GET `url` and read the full body.
///
/// Transport failures (including a body that fails mid-read) become
/// [`PagetextError::Fetch`]; any non-2xx answer becomes
/// [`PagetextError::UpstreamStatus`].
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, PagetextError> {
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| PagetextError::fetch(url, &e))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(PagetextError::UpstreamStatus {
            url: url.to_string(),
            status,
        });
    }

    let body = resp
        .text()
        .await
        .map_err(|e| PagetextError::fetch(url, &e))?;

    tracing::debug!(url, status = status.as_u16(), bytes = body.len(), "fetched page");

    Ok(body)
}

/// Fetch `url` and return its visible text.
pub async fn fetch_text(client: &Client, url: &str) -> Result<String, PagetextError> {
    let body = fetch_page(client, url).await?;

    // Parse in spawn_blocking: scraper's tree is !Send and parsing is CPU-bound
    tokio::task::spawn_blocking(move || extract_text(&body))
        .await
        .map_err(|e| PagetextError::Internal(e.to_string()))
}
