use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url_summarizer::{
    api::routes::create_router,
    config::Config,
    fetch::{WebPageFetcher, YoutubeFetcher},
    summarize::StuffChain,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    let server_addr = config.server_addr;

    let app_state = AppState {
        video_fetcher: Arc::new(YoutubeFetcher::new()),
        page_fetcher: Arc::new(WebPageFetcher::new()),
        chain: Arc::new(StuffChain::new(
            config.llm_api_base.clone(),
            config.llm_model.clone(),
        )),
        config: Arc::new(config),
    };

    // Build the router with routes
    let app = create_router(app_state);

    let listener = TcpListener::bind(server_addr).await?;
    tracing::info!("Listening on {}", server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
