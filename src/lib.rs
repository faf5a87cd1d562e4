pub mod api;
pub mod classify;
pub mod config;
pub mod error;
pub mod fetch;
pub mod llm;
pub mod pipeline;
pub mod summarize;
pub mod validate;

use std::sync::Arc;

use config::Config;
use fetch::ContentFetcher;
use summarize::SummaryChain;

/// Application state shared across handlers. The fetchers and the chain
/// are trait objects so tests can swap in stubs.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub video_fetcher: Arc<dyn ContentFetcher>,
    pub page_fetcher: Arc<dyn ContentFetcher>,
    pub chain: Arc<dyn SummaryChain>,
}
