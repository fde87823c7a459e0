//! In-memory product catalog.
//!
//! This crate owns the product records and every query or mutation on them.
//! The HTTP surface lives in the `catalog-server` crate and only translates
//! requests into calls on a shared [`ProductCatalog`].
//!
//! ## What we do here
//!
//! - **List** with category / stock / text filters and 1-based pagination
//! - **Search** names (and descriptions) case-insensitively
//! - **Stats**: counts per stock state and category, price range and mean
//! - **Create / update / delete** with field validation that reports every
//!   problem at once
//!
//! ## Example
//!
//! ```
//! use catalog::{CatalogConfig, PageRequest, ProductCatalog, ProductDraft, ProductFilter};
//!
//! let catalog = ProductCatalog::seeded(CatalogConfig::default()).unwrap();
//! let desk = catalog
//!     .create(ProductDraft::new("Desk", 150.0, "Office").with_in_stock(true))
//!     .unwrap();
//!
//! let page = catalog
//!     .list(&ProductFilter::default().category("office"), PageRequest::first(10))
//!     .unwrap();
//! assert_eq!(page.total_matching, 1);
//! assert_eq!(page.items[0].id, desk.id);
//!
//! let stats = catalog.stats().unwrap();
//! assert_eq!(stats.total_count, 3);
//! ```
mod catalog;
mod config;
mod error;
mod product;
mod query;
mod seed;
mod stats;
mod validate;

pub use crate::catalog::{CatalogResult, ProductCatalog};
pub use crate::config::{CatalogConfig, ConfigError};
pub use crate::error::{CatalogError, FieldError};
pub use crate::product::{Product, ProductDraft, ProductId, ProductPatch};
pub use crate::query::{PageInfo, PageRequest, ProductFilter, ProductPage};
pub use crate::seed::default_products;
pub use crate::stats::{CatalogStats, PriceStats};
pub use crate::validate::{check_draft, check_patch, draft_from_json, patch_from_json};
