use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Incoming request body. The API key travels with the request and is
/// dropped once the response is rendered; it is never stored or logged.
#[derive(Deserialize)]
pub struct SummarizeRequest {
    pub api_key: String,
    pub url: String,
}

#[derive(Serialize)]
pub struct SummarizeResponse {
    pub url: String,
    pub summary: String,
    pub source: String,
    pub document_count: usize,
    pub summarized_at: DateTime<Utc>,
}
