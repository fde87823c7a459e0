//! Aggregate counts and price figures over the whole catalog.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::product::Product;

/// Snapshot statistics. `price_stats` is `None` for an empty catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_count: usize,
    pub in_stock_count: usize,
    pub out_of_stock_count: usize,
    /// Count per literal category string (grouping is case-sensitive).
    pub categories: BTreeMap<String, usize>,
    pub price_stats: Option<PriceStats>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceStats {
    pub lowest: f64,
    pub highest: f64,
    pub average: f64,
}

impl CatalogStats {
    /// Computes everything in a single pass.
    pub fn collect<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        let mut total_count = 0usize;
        let mut in_stock_count = 0usize;
        let mut categories = BTreeMap::new();
        let mut lowest = f64::INFINITY;
        let mut highest = f64::NEG_INFINITY;
        // Running mean: a plain sum overflows for very large finite prices.
        let mut average = 0.0;

        for product in products {
            total_count += 1;
            if product.in_stock {
                in_stock_count += 1;
            }
            *categories.entry(product.category.clone()).or_insert(0) += 1;
            lowest = lowest.min(product.price);
            highest = highest.max(product.price);
            average += (product.price - average) / total_count as f64;
        }

        let price_stats = (total_count > 0).then(|| PriceStats {
            lowest,
            highest,
            average,
        });

        Self {
            total_count,
            in_stock_count,
            out_of_stock_count: total_count - in_stock_count,
            categories,
            price_stats,
        }
    }
}
