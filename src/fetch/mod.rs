pub mod webpage;
pub mod youtube;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::Result;

pub use webpage::WebPageFetcher;
pub use youtube::YoutubeFetcher;

/// A unit of fetched text plus whatever metadata the source exposed.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub text: String,
    pub metadata: HashMap<String, String>,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Strategy interface for turning a URL into documents.
///
/// Implementations make a single attempt; retries and caching are the
/// caller's problem (and deliberately absent here). Returning an empty
/// vec means the source was reachable but had no usable text.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<Document>>;
}
