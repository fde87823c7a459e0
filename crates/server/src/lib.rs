//! Catalog Server - HTTP REST API for the in-memory product catalog
//!
//! This crate exposes a [`catalog::ProductCatalog`] over JSON/HTTP.
//!
//! # Features
//!
//! - **Authentication**: static shared key in the `x-api-key` header
//!   (missing: 401, wrong: 403)
//! - **Middleware**: request ID tracking, structured logging, CORS,
//!   compression, timeouts
//! - **Configuration**: `.env`, optional `catalog-server` file,
//!   `CATALOG_SERVER__*` variables, plus `PORT` and `API_KEY`
//! - **Error Handling**: every failure renders as
//!   `{error: {type, message, details, timestamp, path}}`
//! - **Graceful Shutdown**: SIGTERM / Ctrl+C
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! ## Public Endpoints (No Authentication)
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//!
//! ## Protected Endpoints (API Key Required, under the base path, default `/api`)
//!
//! - `GET /products` - List with `category`, `inStock`, `search`/`name`, `page`, `limit`
//! - `GET /products/search?q=` - Text search
//! - `GET /products/stats` - Aggregate statistics
//! - `GET /products/{id}` - Fetch one product
//! - `POST /products` - Create (201)
//! - `PUT /products/{id}` - Partial update
//! - `DELETE /products/{id}` - Delete

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
