//! Sample products loaded at startup when `seed_defaults` is enabled.
use crate::product::ProductDraft;

pub fn default_products() -> Vec<ProductDraft> {
    vec![
        ProductDraft::new("Laptop", 1299.99, "Electronics")
            .with_description("High-performance laptop for developers")
            .with_in_stock(true),
        ProductDraft::new("Coffee Mug", 12.99, "Kitchen")
            .with_description("Ceramic mug for your morning coffee")
            .with_in_stock(true),
    ]
}
