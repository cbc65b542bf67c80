use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pagetext_core::PagetextError;

use crate::models::ErrorBody;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Extraction(#[from] PagetextError),
    /// The query string was missing `url` or could not be decoded.
    #[error("{0}")]
    InvalidQuery(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Extraction(e) => e.status_code(),
            ApiError::InvalidQuery(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ApiError::Extraction(PagetextError::Internal(_)) => {
                tracing::error!(error = %self, "internal error");
            }
            _ => tracing::warn!(status = status.as_u16(), error = %self, "request failed"),
        }

        let body = Json(ErrorBody {
            detail: self.to_string(),
        });
        (status, body).into_response()
    }
}
