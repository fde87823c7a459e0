use crate::error::{ErrorReport, ErrorResponse, ServerError};
use crate::state::ServerState;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::net::SocketAddr;
use std::sync::Arc;
use subtle::ConstantTimeEq;

pub const API_KEY_HEADER: &str = "x-api-key";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request id carried in request extensions.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// API key authentication middleware
///
/// A missing or blank header is 401, a present but wrong key is 403.
pub async fn api_key_auth(
    State(state): State<Arc<ServerState>>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let Some(provided) = request
        .headers()
        .get(API_KEY_HEADER)
        .map(|header| header.as_bytes())
        .filter(|value| !value.trim_ascii().is_empty())
    else {
        return Err(ServerError::Unauthorized);
    };

    let expected = state.config.api_key.as_bytes();
    if !bool::from(provided.ct_eq(expected)) {
        return Err(ServerError::Forbidden);
    }

    Ok(next.run(request).await)
}

/// Request ID injection middleware
pub async fn request_id(mut request: Request, next: Next) -> Response {
    // Generate or extract request ID
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Logging middleware
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();

    tracing::info!(
        method = %method,
        uri = %uri,
        request_id = %request_id,
        "Request started"
    );

    let response = next.run(request).await;
    let duration = start.elapsed();
    let status = response.status();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %status,
        duration_ms = %duration.as_millis(),
        request_id = %request_id,
        "Request completed"
    );

    response
}

/// Error formatting middleware
///
/// Every [`ServerError`] response passes through here: the request path is
/// stamped into the body and the failure is logged with method, path and
/// remote address before the response leaves the server.
pub async fn render_errors(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let mut response = next.run(request).await;
    let Some(ErrorReport { mut detail, cause }) = response.extensions_mut().remove::<ErrorReport>()
    else {
        return response;
    };

    let status = response.status();
    detail.path = Some(path.clone());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            remote_addr = %remote_addr,
            status = %status,
            error_type = %detail.kind,
            timestamp = %detail.timestamp.to_rfc3339(),
            cause = %cause,
            "Request failed"
        );
    } else {
        tracing::warn!(
            method = %method,
            path = %path,
            remote_addr = %remote_addr,
            status = %status,
            error_type = %detail.kind,
            timestamp = %detail.timestamp.to_rfc3339(),
            cause = %cause,
            "Request rejected"
        );
    }

    (status, Json(ErrorResponse { error: detail })).into_response()
}
