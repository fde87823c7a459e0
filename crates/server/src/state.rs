use crate::config::ServerConfig;
use crate::error::ServerResult;
use catalog::ProductCatalog;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Product catalog (shared across requests)
    pub catalog: Arc<ProductCatalog>,

    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl ServerState {
    /// Create new server state with a catalog built from `config.catalog`
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let catalog = Arc::new(ProductCatalog::seeded(config.catalog.clone())?);
        Ok(Self::with_catalog(config, catalog))
    }

    /// Create state around an existing catalog instance
    pub fn with_catalog(config: ServerConfig, catalog: Arc<ProductCatalog>) -> Self {
        Self {
            config: Arc::new(config),
            catalog,
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// Server metadata for health checks
#[derive(Debug, serde::Serialize)]
pub struct ServerMetadata {
    pub version: String,
    pub uptime_seconds: u64,
}
