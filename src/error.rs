use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::response::ApiResponse;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Invalid YouTube URL format: {0}")]
    UnsupportedYouTubeFormat(String),

    #[error("{0}")]
    EmptyContent(String),

    #[error("{0}")]
    Fetch(String),

    #[error("Error generating summary: {0}")]
    Summarization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl AppError {
    /// Status code the error renders with. Fetch failures map to 400 since
    /// the URL the caller supplied is what could not be loaded.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedYouTubeFormat(_) => StatusCode::BAD_REQUEST,
            AppError::EmptyContent(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Fetch(_) => StatusCode::BAD_REQUEST,
            AppError::Summarization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        ApiResponse::error(self.status(), self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
