use anyhow::{bail, Context};
use catalog::CatalogConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// API key used when none is configured outside production.
pub const DEV_API_KEY: &str = "default-secret-key-123";

/// Port used when none is configured outside production.
pub const DEV_PORT: u16 = 3000;

/// Deployment environment. Development defaults are refused in production.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

/// Raw settings as read from files and the environment.
///
/// `port` and `api_key` stay optional here so [`ServerConfig::from_source`]
/// can tell an explicit value from a missing one.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigSource {
    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub bind_addr: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub base_path: Option<String>,

    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub max_body_size_kb: Option<usize>,

    #[serde(default)]
    pub enable_cors: Option<bool>,

    #[serde(default)]
    pub log_level: Option<String>,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub environment: Environment,

    /// Server bind address
    pub bind_addr: String,

    /// Server port
    pub port: u16,

    /// Shared secret expected in the `x-api-key` header
    pub api_key: String,

    /// Prefix the product routes are mounted under, e.g. `/api`
    pub base_path: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum request body size in KB
    pub max_body_size_kb: usize,

    /// Enable CORS
    pub enable_cors: bool,

    /// Log level / env-filter directive
    pub log_level: String,

    /// Catalog query and seeding settings
    pub catalog: CatalogConfig,

    /// Development fallbacks applied while resolving the config. Logged by
    /// `start_server` once the subscriber is installed.
    #[serde(skip)]
    pub startup_warnings: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            bind_addr: default_bind_addr(),
            port: DEV_PORT,
            api_key: DEV_API_KEY.to_string(),
            base_path: default_base_path(),
            timeout_secs: default_timeout_secs(),
            max_body_size_kb: default_max_body_size_kb(),
            enable_cors: true,
            log_level: default_log_level(),
            catalog: CatalogConfig::default(),
            startup_warnings: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, an optional `catalog-server` config
    /// file, `CATALOG_SERVER__*` variables and finally `PORT` / `API_KEY`.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("catalog-server").required(false))
            // Override with environment variables
            .add_source(
                config::Environment::with_prefix("CATALOG_SERVER")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("port", std::env::var("PORT").ok())?
            .set_override_option("api_key", std::env::var("API_KEY").ok())?;

        let source: ConfigSource = builder.build()?.try_deserialize()?;
        Self::from_source(source)
    }

    /// Resolve raw settings, applying development defaults where allowed.
    ///
    /// Each default applied is recorded in `startup_warnings`; nothing is
    /// logged here because tracing is not installed yet.
    pub fn from_source(source: ConfigSource) -> anyhow::Result<Self> {
        let production = source.environment.is_production();
        let mut startup_warnings = Vec::new();

        let port = match source.port {
            Some(port) => port,
            None if production => bail!("PORT must be set in production"),
            None => {
                startup_warnings
                    .push(format!("No port configured, using development default {DEV_PORT}"));
                DEV_PORT
            }
        };

        let api_key = match source.api_key.filter(|k| !k.trim().is_empty()) {
            Some(key) => key,
            None if production => bail!("API_KEY must be set in production"),
            None => {
                startup_warnings.push(format!(
                    "No API key configured, using development key '{DEV_API_KEY}'"
                ));
                DEV_API_KEY.to_string()
            }
        };

        let base_path = normalize_base_path(source.base_path.as_deref().unwrap_or("/api"))?;

        source
            .catalog
            .validate()
            .context("invalid catalog configuration")?;

        Ok(Self {
            environment: source.environment,
            bind_addr: source.bind_addr.unwrap_or_else(default_bind_addr),
            port,
            api_key,
            base_path,
            timeout_secs: source.timeout_secs.unwrap_or_else(default_timeout_secs),
            max_body_size_kb: source
                .max_body_size_kb
                .unwrap_or_else(default_max_body_size_kb),
            enable_cors: source.enable_cors.unwrap_or(true),
            log_level: source.log_level.unwrap_or_else(default_log_level),
            catalog: source.catalog,
            startup_warnings,
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_kb * 1024
    }
}

/// `""` and `"/"` mean "mount at the root"; otherwise a leading slash is
/// required and a trailing one is dropped.
fn normalize_base_path(path: &str) -> anyhow::Result<String> {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    if !trimmed.starts_with('/') {
        bail!("base_path must start with '/': {path}");
    }
    Ok(trimmed.to_string())
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_base_path() -> String {
    "/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_body_size_kb() -> usize {
    100
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.api_key, DEV_API_KEY);
        assert_eq!(cfg.base_path, "/api");
        assert_eq!(cfg.timeout_secs, 30);
        assert_eq!(cfg.max_body_size(), 100 * 1024);
        assert!(cfg.enable_cors);
    }

    #[test]
    fn test_socket_addr() {
        let cfg = ServerConfig::default();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_development_defaults_apply() {
        let cfg = ServerConfig::from_source(ConfigSource::default()).unwrap();
        assert_eq!(cfg.port, DEV_PORT);
        assert_eq!(cfg.api_key, DEV_API_KEY);
        assert_eq!(cfg.environment, Environment::Development);
        assert_eq!(cfg.startup_warnings.len(), 2);
        assert!(cfg.startup_warnings[0].contains("port"));
        assert!(cfg.startup_warnings[1].contains(DEV_API_KEY));
    }

    #[test]
    fn test_explicit_settings_report_no_fallbacks() {
        let source = ConfigSource {
            port: Some(8080),
            api_key: Some("real-key".into()),
            ..ConfigSource::default()
        };
        let cfg = ServerConfig::from_source(source).unwrap();
        assert!(cfg.startup_warnings.is_empty());
    }

    #[test]
    fn test_production_requires_api_key_and_port() {
        let source = ConfigSource {
            environment: Environment::Production,
            port: Some(8080),
            ..ConfigSource::default()
        };
        let err = ServerConfig::from_source(source).unwrap_err();
        assert!(err.to_string().contains("API_KEY"));

        let source = ConfigSource {
            environment: Environment::Production,
            api_key: Some("prod-key".into()),
            ..ConfigSource::default()
        };
        let err = ServerConfig::from_source(source).unwrap_err();
        assert!(err.to_string().contains("PORT"));

        let source = ConfigSource {
            environment: Environment::Production,
            port: Some(8080),
            api_key: Some("prod-key".into()),
            ..ConfigSource::default()
        };
        let cfg = ServerConfig::from_source(source).unwrap();
        assert_eq!(cfg.api_key, "prod-key");
        assert_eq!(cfg.port, 8080);
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let source = ConfigSource {
            api_key: Some("   ".into()),
            ..ConfigSource::default()
        };
        let cfg = ServerConfig::from_source(source).unwrap();
        assert_eq!(cfg.api_key, DEV_API_KEY);
    }

    #[test]
    fn test_base_path_normalization() {
        assert_eq!(normalize_base_path("/api/").unwrap(), "/api");
        assert_eq!(normalize_base_path("/").unwrap(), "");
        assert_eq!(normalize_base_path("").unwrap(), "");
        assert!(normalize_base_path("api").is_err());
    }

    #[test]
    fn test_invalid_catalog_section_is_rejected() {
        let source = ConfigSource {
            catalog: CatalogConfig {
                max_page_limit: 0,
                ..CatalogConfig::default()
            },
            ..ConfigSource::default()
        };
        assert!(ServerConfig::from_source(source).is_err());
    }
}
