//! Catalog Server - HTTP REST API for the in-memory product catalog
//!
//! Reads configuration from the environment and serves until shut down.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;

    // Start server
    server::start_server(config).await?;

    Ok(())
}
