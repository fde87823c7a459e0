//! Tunables for the catalog core.
//!
//! [`CatalogConfig`] is deserialized from the `catalog` section of the server
//! configuration; every field has a default so the section may be omitted.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by [`CatalogConfig::validate`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    ZeroLimit(&'static str),

    #[error("default_page_limit ({default}) exceeds max_page_limit ({max})")]
    DefaultAboveMax { default: usize, max: usize },
}

/// Runtime configuration for catalog queries and startup contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Page size used when a list request does not name one.
    #[serde(default = "default_page_limit")]
    pub default_page_limit: usize,

    /// Upper bound on page size; larger requests are clamped.
    #[serde(default = "default_max_page_limit")]
    pub max_page_limit: usize,

    /// Whether text search also looks at `description`.
    #[serde(default = "default_true")]
    pub search_descriptions: bool,

    /// Load the built-in sample products at startup.
    #[serde(default = "default_true")]
    pub seed_defaults: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_page_limit: default_page_limit(),
            max_page_limit: default_max_page_limit(),
            search_descriptions: default_true(),
            seed_defaults: default_true(),
        }
    }
}

impl CatalogConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_page_limit == 0 {
            return Err(ConfigError::ZeroLimit("default_page_limit"));
        }
        if self.max_page_limit == 0 {
            return Err(ConfigError::ZeroLimit("max_page_limit"));
        }
        if self.default_page_limit > self.max_page_limit {
            return Err(ConfigError::DefaultAboveMax {
                default: self.default_page_limit,
                max: self.max_page_limit,
            });
        }
        Ok(())
    }
}

fn default_page_limit() -> usize {
    10
}

fn default_max_page_limit() -> usize {
    100
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = CatalogConfig::default();
        assert_eq!(cfg.default_page_limit, 10);
        assert_eq!(cfg.max_page_limit, 100);
        assert!(cfg.search_descriptions);
        assert!(cfg.seed_defaults);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_partial_deserialize_fills_defaults() {
        let cfg: CatalogConfig = serde_json::from_str(r#"{"max_page_limit": 20}"#).unwrap();
        assert_eq!(cfg.max_page_limit, 20);
        assert_eq!(cfg.default_page_limit, 10);
    }

    #[test]
    fn test_validate_rejects_bad_limits() {
        let cfg = CatalogConfig {
            default_page_limit: 0,
            ..CatalogConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::ZeroLimit("default_page_limit"))
        );

        let cfg = CatalogConfig {
            default_page_limit: 50,
            max_page_limit: 20,
            ..CatalogConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::DefaultAboveMax { default: 50, max: 20 })
        ));
    }
}
