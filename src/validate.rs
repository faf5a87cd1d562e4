use url::Url;

use crate::error::{AppError, Result};

const MISSING_INPUT_MSG: &str = "Please provide an API key and a URL to get started";
const INVALID_URL_MSG: &str =
    "Please enter a valid URL. It can be a YouTube video URL or a website URL";

/// Checks the request inputs before anything touches the network.
///
/// Succeeds only when the API key and URL are non-blank and the URL parses
/// as an absolute http(s) URL with a host. Returns the trimmed URL so the
/// rest of the pipeline never sees stray whitespace.
pub fn validate_request(api_key: &str, raw_url: &str) -> Result<String> {
    if api_key.trim().is_empty() || raw_url.trim().is_empty() {
        return Err(AppError::InvalidInput(MISSING_INPUT_MSG.to_string()));
    }

    let trimmed = raw_url.trim();
    let parsed =
        Url::parse(trimmed).map_err(|_| AppError::InvalidInput(INVALID_URL_MSG.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(AppError::InvalidInput(INVALID_URL_MSG.to_string()));
    }

    Ok(trimmed.to_string())
}
