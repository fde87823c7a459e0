use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalog::{CatalogError, FieldError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("API key required. Provide it in the 'x-api-key' header")]
    Unauthorized,

    #[error("Invalid API key")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Request body too large: {0}")]
    PayloadTooLarge(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// API error response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
    pub timestamp: DateTime<Utc>,
    /// Filled in by [`render_errors`](crate::middleware::render_errors).
    pub path: Option<String>,
}

/// Attached to error responses so the formatting middleware can log the
/// full cause and stamp the request path.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub detail: ErrorDetail,
    pub cause: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServerError::Forbidden => StatusCode::FORBIDDEN,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Validation(_)
            | ServerError::InvalidArgument(_)
            | ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error type name
    pub fn error_type(&self) -> &'static str {
        match self {
            ServerError::Unauthorized => "UnauthorizedError",
            ServerError::Forbidden => "ForbiddenError",
            ServerError::NotFound(_) => "NotFoundError",
            ServerError::Validation(_) => "ValidationError",
            ServerError::InvalidArgument(_) => "InvalidArgumentError",
            ServerError::BadRequest(_) => "BadRequestError",
            ServerError::PayloadTooLarge(_) => "PayloadTooLargeError",
            ServerError::Timeout => "TimeoutError",
            ServerError::Internal(_) => "InternalError",
        }
    }

    fn public_message(&self) -> String {
        match self {
            // Never echo internal causes to clients.
            ServerError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ServerError::Validation(errors) => serde_json::to_value(errors).ok(),
            _ => None,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = ErrorDetail {
            kind: self.error_type().to_string(),
            message: self.public_message(),
            details: self.details(),
            timestamp: Utc::now(),
            path: None,
        };
        let report = ErrorReport {
            detail: detail.clone(),
            cause: self.to_string(),
        };

        let mut response = (status, Json(ErrorResponse { error: detail })).into_response();
        response.extensions_mut().insert(report);
        response
    }
}

impl From<CatalogError> for ServerError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { id } => ServerError::NotFound(format!("Product {id} not found")),
            CatalogError::Validation(errors) => ServerError::Validation(errors),
            CatalogError::InvalidArgument(msg) => ServerError::InvalidArgument(msg),
            other => ServerError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        // `DefaultBodyLimit` surfaces as a length-limit rejection with 413.
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ServerError::PayloadTooLarge(rejection.body_text())
        } else {
            ServerError::BadRequest(rejection.body_text())
        }
    }
}

impl From<QueryRejection> for ServerError {
    fn from(rejection: QueryRejection) -> Self {
        ServerError::InvalidArgument(rejection.body_text())
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(err: serde_json::Error) -> Self {
        ServerError::Internal(format!("JSON encode error: {err}"))
    }
}
