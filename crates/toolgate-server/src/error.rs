//! Mapping from core errors to HTTP responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use toolgate_core::CoreError;
use toolgate_protocol::{ErrorBody, StatusClass, ToolError};

/// Error response carrying a status code and a `{"detail": ..}` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail)
    }
}

impl From<ToolError> for ApiError {
    fn from(err: ToolError) -> Self {
        let status = match err.status_class() {
            StatusClass::NotFound => StatusCode::NOT_FOUND,
            StatusClass::BadRequest => StatusCode::BAD_REQUEST,
            StatusClass::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.reason())
    }
}

/// Every orchestrator failure is a 500, whatever the underlying tool error.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                detail: self.detail,
            }),
        )
            .into_response()
    }
}
