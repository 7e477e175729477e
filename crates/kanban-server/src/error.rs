//! HTTP error responses.
//!
//! Form and page handlers answer failures with a JSON body of the shape
//! `{"error": {"code": ..., "message": ...}}`. The move endpoint has its own
//! `{ok:false,error}` acknowledgement and only uses this type for fatal
//! store errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kanban_core::KanbanError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable code, e.g. `NOT_FOUND`
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match self {
            ApiError::NotFound(message) => ("NOT_FOUND", message),
            ApiError::Validation(message) => ("VALIDATION_ERROR", message),
            ApiError::Internal(message) => {
                tracing::error!("Request failed: {}", message);
                ("INTERNAL_ERROR", message)
            }
        };

        (
            status,
            Json(ApiErrorResponse {
                error: ApiErrorBody { code, message },
            }),
        )
            .into_response()
    }
}

impl From<KanbanError> for ApiError {
    fn from(err: KanbanError) -> Self {
        match err {
            KanbanError::NotFound(message) => ApiError::NotFound(message),
            KanbanError::Validation(message) => ApiError::Validation(message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
