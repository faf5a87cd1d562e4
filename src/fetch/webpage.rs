use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::fetch::{ContentFetcher, Document};

/// Browser User-Agent sent with every page fetch so trivially bot-blocked
/// sites still answer. Carried over from the original tool as-is.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_5_1) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/116.0.0.0 Safari/537.36";

// WARNING: certificate verification is off, matching the original tool's
// ssl_verify=False. Fetched page content is exposed to MITM; see DESIGN.md.
static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .danger_accept_invalid_certs(true)
        .user_agent(BROWSER_USER_AGENT)
        .build()
        .expect("Failed to build HTTP client")
});

static BODY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("body").expect("Failed to parse body selector"));

/// Fetches a generic web page and extracts its visible body text.
pub struct WebPageFetcher;

impl WebPageFetcher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WebPageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentFetcher for WebPageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<Document>> {
        let response = CLIENT
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Fetch(format!("Error loading website content: {e}")))?;
        let html = response
            .text()
            .await
            .map_err(|e| AppError::Fetch(format!("Error reading website content: {e}")))?;

        let Some(body) = extract_body_text(&html) else {
            return Ok(Vec::new());
        };
        let text = normalize_text(&body);
        if text.is_empty() {
            return Ok(Vec::new());
        }

        Ok(vec![Document::new(text).with_metadata("source", url)])
    }
}

/// Text content of the `<body>` element, one fragment per line.
fn extract_body_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&BODY_SELECTOR)
        .next()
        .map(|body| body.text().collect::<Vec<_>>().join("\n"))
}

/// Collapses blank lines and per-line whitespace without dropping content.
fn normalize_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last_was_whitespace = true;

    for line in text.lines() {
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            if !last_was_whitespace {
                result.push('\n');
            }
            result.push_str(trimmed);
            last_was_whitespace = false;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_visible_body_text() {
        let html = "<html><head><title>t</title></head>\
                    <body><h1>Heading</h1><p>First para.</p><p>Second.</p></body></html>";
        let body = extract_body_text(html).unwrap();
        let text = normalize_text(&body);
        assert!(text.contains("Heading"));
        assert!(text.contains("First para."));
        assert!(text.contains("Second."));
        assert!(!text.contains("<p>"));
    }

    #[test]
    fn normalize_collapses_blank_lines() {
        let messy = "  line one  \n\n\n   \n line two \n";
        assert_eq!(normalize_text(messy), "line one\nline two");
    }

    #[test]
    fn whitespace_only_body_is_empty() {
        let html = "<html><body>   \n\t  </body></html>";
        let body = extract_body_text(html).unwrap();
        assert_eq!(normalize_text(&body), "");
    }
}
