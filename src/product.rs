//! Product records and the inputs used to create or change them.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque product identifier, assigned by the catalog on create.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    /// Generates a fresh random (v4) identifier.
    pub fn generate() -> Self {
        ProductId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        ProductId(value.to_string())
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        ProductId(value)
    }
}

/// A product held by the catalog.
///
/// `id` and `created_at` never change after creation; `updated_at` is
/// refreshed by every successful update and is never earlier than
/// `created_at`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Merges the supplied fields of `patch` and refreshes `updated_at`.
    ///
    /// The patch is assumed to be validated already.
    pub(crate) fn apply(&mut self, patch: ProductPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(category) = patch.category {
            self.category = category.trim().to_string();
        }
        if let Some(in_stock) = patch.in_stock {
            self.in_stock = in_stock;
        }
        self.updated_at = now.max(self.created_at);
    }
}

/// Input for [`ProductCatalog::create`](crate::ProductCatalog::create).
///
/// Every field is optional here so that missing required fields can be
/// reported together instead of failing on the first one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}

impl ProductDraft {
    /// Draft with the three required fields set.
    pub fn new(name: impl Into<String>, price: f64, category: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price),
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = Some(in_stock);
        self
    }
}

/// Partial update: only the fields that are `Some` are written.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.in_stock.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample(now: DateTime<Utc>) -> Product {
        Product {
            id: ProductId::from("p-1"),
            name: "Lamp".into(),
            description: "Desk lamp".into(),
            price: 20.0,
            category: "Home".into(),
            in_stock: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn apply_only_touches_supplied_fields() {
        let now = Utc::now();
        let mut product = sample(now);
        let later = now + Duration::seconds(5);

        product.apply(
            ProductPatch {
                price: Some(25.5),
                in_stock: Some(true),
                ..ProductPatch::default()
            },
            later,
        );

        assert_eq!(product.price, 25.5);
        assert!(product.in_stock);
        assert_eq!(product.name, "Lamp");
        assert_eq!(product.description, "Desk lamp");
        assert_eq!(product.created_at, now);
        assert_eq!(product.updated_at, later);
    }

    #[test]
    fn updated_at_never_precedes_created_at() {
        let now = Utc::now();
        let mut product = sample(now);
        product.apply(ProductPatch::default(), now - Duration::hours(1));
        assert_eq!(product.updated_at, now);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(sample(Utc::now())).unwrap();
        assert_eq!(value["id"], "p-1");
        assert_eq!(value["inStock"], false);
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(ProductId::generate(), ProductId::generate());
    }
}
