use axum::{
    extract::rejection::JsonRejection,
    extract::{Json, State},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::Utc;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::api::models::{SummarizeRequest, SummarizeResponse};
use crate::api::response::ApiResponse;
use crate::error::AppError;
use crate::pipeline::{Pipeline, Terminal};
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/summarize", post(summarize_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn summarize_handler(
    State(state): State<AppState>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return AppError::Unexpected(rejection.body_text()).into_response();
        }
    };
    tracing::info!(url = %req.url, "summarize request received");
    let start = std::time::Instant::now();

    // Every request gets its own pipeline; nothing is shared between runs.
    let pipeline = Pipeline::new(
        Arc::clone(&state.video_fetcher),
        Arc::clone(&state.page_fetcher),
        Arc::clone(&state.chain),
    );
    let report = pipeline.run(&req.api_key, &req.url).await;

    tracing::info!(url = %req.url, elapsed = ?start.elapsed(), "request processed");

    match report.terminal {
        Terminal::Success(out) => ApiResponse::success(SummarizeResponse {
            url: req.url,
            summary: out.summary,
            source: out.source.to_string(),
            document_count: out.document_count,
            summarized_at: Utc::now(),
        })
        .into_response(),
        Terminal::Error(err) => err.into_response(),
    }
}
