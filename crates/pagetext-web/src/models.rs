use serde::{Deserialize, Serialize};

/// Query string of `GET /get-text/`.
#[derive(Debug, Clone, Deserialize)]
pub struct TextQuery {
    pub url: String,
}

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}
