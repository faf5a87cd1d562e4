use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;

/// Uniform envelope for every response the service emits. Error bodies
/// carry the categorized message in `meta.message` and a null `data`.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub meta: ResponseMeta,
}

#[derive(Serialize)]
pub struct ResponseMeta {
    pub status: String,
    pub status_code: u16,
    pub timestamp: String,
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            meta: ResponseMeta {
                status: "success".to_string(),
                status_code: StatusCode::OK.as_u16(),
                timestamp: Utc::now().to_rfc3339(),
                message: None,
            },
        }
    }
}

impl ApiResponse<()> {
    pub fn error(status: StatusCode, message: String) -> Self {
        Self {
            data: None,
            meta: ResponseMeta {
                status: "error".to_string(),
                status_code: status.as_u16(),
                timestamp: Utc::now().to_rfc3339(),
                message: Some(message),
            },
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.meta.status_code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
