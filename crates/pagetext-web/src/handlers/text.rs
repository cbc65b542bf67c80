use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::TextQuery;
use crate::state::AppState;

/// `GET /get-text/?url=...`: fetch the target and answer with its visible
/// text as `text/plain`.
pub async fn get_text(
    State(state): State<Arc<AppState>>,
    query: Result<Query<TextQuery>, QueryRejection>,
) -> Result<String, ApiError> {
    let Query(TextQuery { url }) = query.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;

    let text = pagetext_core::fetch_text(&state.client, &url).await?;
    tracing::info!(url = %url, chars = text.chars().count(), "extracted text");

    Ok(text)
}
