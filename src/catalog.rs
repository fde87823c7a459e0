//! The owned, in-memory product store.
//!
//! [`ProductCatalog`] keeps products in insertion order behind a single
//! `RwLock`. Each operation takes the lock exactly once, so concurrent
//! request handlers never observe a half-applied mutation.
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::{debug, info};

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::product::{Product, ProductDraft, ProductId, ProductPatch};
use crate::query::{paginate, PageRequest, ProductFilter, ProductPage, TextMatcher};
use crate::seed::default_products;
use crate::stats::CatalogStats;
use crate::validate::{check_draft, check_patch};

pub type CatalogResult<T> = Result<T, CatalogError>;

/// In-memory product catalog.
///
/// Instances are independent: share one through `Arc` to serve requests,
/// build fresh ones for tests.
#[derive(Debug)]
pub struct ProductCatalog {
    config: CatalogConfig,
    products: RwLock<Vec<Product>>,
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}

impl ProductCatalog {
    /// Creates an empty catalog.
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            config,
            products: RwLock::new(Vec::new()),
        }
    }

    /// Creates a catalog holding `products` in the given order.
    ///
    /// Records with an id already present are dropped so ids stay unique.
    pub fn with_products(config: CatalogConfig, products: Vec<Product>) -> Self {
        let mut unique: Vec<Product> = Vec::with_capacity(products.len());
        for product in products {
            if unique.iter().any(|p| p.id == product.id) {
                debug!(id = %product.id, "dropping duplicate product id");
                continue;
            }
            unique.push(product);
        }
        Self {
            config,
            products: RwLock::new(unique),
        }
    }

    /// Creates a catalog and loads the sample products when
    /// `config.seed_defaults` is set.
    pub fn seeded(config: CatalogConfig) -> CatalogResult<Self> {
        let seed = config.seed_defaults;
        let catalog = Self::new(config);
        if seed {
            for draft in default_products() {
                catalog.create(draft)?;
            }
            let count = catalog.len()?;
            info!(count, "seeded default products");
        }
        Ok(catalog)
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn len(&self) -> CatalogResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> CatalogResult<bool> {
        Ok(self.read()?.is_empty())
    }

    /// Filters, then slices the matches to one page.
    ///
    /// `request.limit` is clamped to `max_page_limit`. A page beyond the last
    /// one yields no items rather than an error.
    pub fn list(&self, filter: &ProductFilter, request: PageRequest) -> CatalogResult<ProductPage> {
        let request = request.clamp_limit(self.config.max_page_limit);
        let compiled = filter.compile(self.config.search_descriptions);

        let matches: Vec<Product> = self
            .read()?
            .iter()
            .filter(|p| compiled.matches(p))
            .cloned()
            .collect();

        Ok(paginate(matches, request))
    }

    /// Page request using the configured default size.
    pub fn default_page(&self) -> PageRequest {
        PageRequest::first(self.config.default_page_limit)
    }

    pub fn get(&self, id: &ProductId) -> CatalogResult<Product> {
        self.read()?
            .iter()
            .find(|p| p.id == *id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(id.as_str()))
    }

    /// Returns every product whose name (or description, when enabled)
    /// contains `term`, ignoring case, in catalog order.
    ///
    /// A blank term is rejected; it never means "everything".
    pub fn search(&self, term: &str) -> CatalogResult<Vec<Product>> {
        if term.trim().is_empty() {
            return Err(CatalogError::invalid_argument(
                "search term must not be empty",
            ));
        }
        let matcher = TextMatcher::new(term, self.config.search_descriptions);
        Ok(self
            .read()?
            .iter()
            .filter(|p| matcher.matches(p))
            .cloned()
            .collect())
    }

    pub fn stats(&self) -> CatalogResult<CatalogStats> {
        Ok(CatalogStats::collect(self.read()?.iter()))
    }

    /// Validates `draft`, assigns a new id and appends the product.
    ///
    /// `in_stock` defaults to `false` and `description` to empty.
    pub fn create(&self, draft: ProductDraft) -> CatalogResult<Product> {
        if let Err(err) = check_draft(&draft) {
            debug!(error = %err, "rejected product draft");
            return Err(err);
        }

        let now = Utc::now();
        let mut products = self.write()?;

        let mut id = ProductId::generate();
        while products.iter().any(|p| p.id == id) {
            id = ProductId::generate();
        }

        let product = Product {
            id,
            name: draft.name.unwrap_or_default().trim().to_string(),
            description: draft.description.unwrap_or_default(),
            price: draft.price.unwrap_or_default(),
            category: draft.category.unwrap_or_default().trim().to_string(),
            in_stock: draft.in_stock.unwrap_or(false),
            created_at: now,
            updated_at: now,
        };
        products.push(product.clone());

        info!(id = %product.id, category = %product.category, "product created");
        Ok(product)
    }

    /// Merges the supplied fields into an existing product.
    ///
    /// Unknown ids fail with `NotFound` before the patch is validated.
    pub fn update(&self, id: &ProductId, patch: ProductPatch) -> CatalogResult<Product> {
        let mut products = self.write()?;
        let product = products
            .iter_mut()
            .find(|p| p.id == *id)
            .ok_or_else(|| CatalogError::not_found(id.as_str()))?;

        if let Err(err) = check_patch(&patch) {
            debug!(id = %id, error = %err, "rejected product patch");
            return Err(err);
        }

        product.apply(patch, Utc::now());
        info!(id = %id, "product updated");
        Ok(product.clone())
    }

    /// Removes the product and returns it. A second delete of the same id
    /// fails with `NotFound`.
    pub fn delete(&self, id: &ProductId) -> CatalogResult<Product> {
        let mut products = self.write()?;
        let index = products
            .iter()
            .position(|p| p.id == *id)
            .ok_or_else(|| CatalogError::not_found(id.as_str()))?;

        let removed = products.remove(index);
        info!(id = %id, "product deleted");
        Ok(removed)
    }

    fn read(&self) -> CatalogResult<RwLockReadGuard<'_, Vec<Product>>> {
        self.products.read().map_err(|_| CatalogError::poisoned())
    }

    fn write(&self) -> CatalogResult<RwLockWriteGuard<'_, Vec<Product>>> {
        self.products.write().map_err(|_| CatalogError::poisoned())
    }
}
