//! API route handlers
//!
//! - `health`: liveness and readiness probes
//! - `products`: the catalog resource (list, search, stats, CRUD)
//!
//! The extractors here wrap axum's own so that malformed bodies and query
//! strings are reported through [`ServerError`] like every other failure.

pub mod health;
pub mod products;

use crate::error::{ServerError, ServerResult};
use crate::state::{ServerMetadata, ServerState};
use axum::extract::{ConnectInfo, FromRequest, FromRequestParts, OriginalUri, Request, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;

/// JSON body extractor whose rejection is a [`ServerError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct ApiJson<T>(pub T);

/// Query-string extractor whose rejection is a [`ServerError`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ServerError))]
pub struct ApiQuery<T>(pub T);

/// API version and base info
///
/// This is the root endpoint (GET /) and requires no authentication.
pub async fn api_info(State(state): State<Arc<ServerState>>) -> ServerResult<impl IntoResponse> {
    let base = &state.config.base_path;
    let metadata = ServerMetadata {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    };

    Ok(Json(json!({
        "name": "Product Catalog Server",
        "version": metadata.version,
        "uptime_seconds": metadata.uptime_seconds,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "endpoints": {
            "products": format!("{base}/products"),
            "search": format!("{base}/products/search?q=name"),
            "stats": format!("{base}/products/stats"),
            "health": "/health",
            "ready": "/ready",
        }
    })))
}

/// 404 handler for unmatched routes
///
/// Also installed as the method-not-allowed fallback, so a known path hit
/// with an unsupported method answers the same way.
pub async fn not_found(request: Request) -> impl IntoResponse {
    let method = request.method().clone();
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|OriginalUri(uri)| uri.path().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    tracing::warn!(
        method = %method,
        path = %path,
        remote_addr = %remote_addr,
        status = %StatusCode::NOT_FOUND,
        "Route not found"
    );

    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Route not found",
            "path": path,
            "method": method.as_str(),
        })),
    )
}
