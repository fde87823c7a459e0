//! Filters and pagination over the product sequence.
//!
//! Filters are independent per-record predicates combined with AND, so the
//! order in which they are applied does not change the result. Matches keep
//! catalog (insertion) order; nothing is sorted.
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::product::Product;

/// Narrowing criteria for [`ProductCatalog::list`](crate::ProductCatalog::list).
///
/// Blank strings are treated the same as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    /// Exact category, compared case-insensitively.
    pub category: Option<String>,
    pub in_stock: Option<bool>,
    /// Case-insensitive substring of the name (and description, if enabled).
    pub search: Option<String>,
}

impl ProductFilter {
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = Some(in_stock);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Lowercases the text criteria once so per-record checks do not
    /// allocate for the needle.
    pub(crate) fn compile(&self, search_descriptions: bool) -> CompiledFilter {
        CompiledFilter {
            category: non_blank(&self.category).map(str::to_lowercase),
            in_stock: self.in_stock,
            search: non_blank(&self.search)
                .map(|term| TextMatcher::new(term, search_descriptions)),
        }
    }
}

pub(crate) struct CompiledFilter {
    category: Option<String>,
    in_stock: Option<bool>,
    search: Option<TextMatcher>,
}

impl CompiledFilter {
    pub(crate) fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if product.category.to_lowercase() != *category {
                return false;
            }
        }
        if let Some(in_stock) = self.in_stock {
            if product.in_stock != in_stock {
                return false;
            }
        }
        match &self.search {
            Some(matcher) => matcher.matches(product),
            None => true,
        }
    }
}

/// Case-insensitive substring matcher shared by list search and `search`.
pub(crate) struct TextMatcher {
    needle: String,
    include_description: bool,
}

impl TextMatcher {
    pub(crate) fn new(term: &str, include_description: bool) -> Self {
        Self {
            needle: term.trim().to_lowercase(),
            include_description,
        }
    }

    pub(crate) fn matches(&self, product: &Product) -> bool {
        product.name.to_lowercase().contains(&self.needle)
            || (self.include_description
                && product.description.to_lowercase().contains(&self.needle))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// A 1-based page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl PageRequest {
    /// Builds a request, rejecting zero for either value.
    pub fn new(page: usize, limit: usize) -> Result<Self, CatalogError> {
        if page == 0 {
            return Err(CatalogError::invalid_argument(
                "page must be a positive integer",
            ));
        }
        if limit == 0 {
            return Err(CatalogError::invalid_argument(
                "limit must be a positive integer",
            ));
        }
        Ok(Self { page, limit })
    }

    /// First page with the given size.
    pub fn first(limit: usize) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
        }
    }

    pub(crate) fn clamp_limit(self, max_limit: usize) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.clamp(1, max_limit.max(1)),
        }
    }

    fn start(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Page metadata returned next to the items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub total_matching: usize,
    pub page_info: PageInfo,
}

/// Slices `matches` to the requested page. Pages past the end are empty.
pub(crate) fn paginate(matches: Vec<Product>, request: PageRequest) -> ProductPage {
    let total = matches.len();
    let start = request.start();
    let end = start.saturating_add(request.limit);

    let items: Vec<Product> = matches
        .into_iter()
        .skip(start)
        .take(request.limit)
        .collect();

    ProductPage {
        items,
        total_matching: total,
        page_info: PageInfo {
            current_page: request.page,
            total_pages: total.div_ceil(request.limit),
            total_items: total,
            items_per_page: request.limit,
            has_next: end < total,
            has_prev: start > 0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProductId;
    use chrono::Utc;

    fn product(name: &str, description: &str, category: &str, in_stock: bool) -> Product {
        let now = Utc::now();
        Product {
            id: ProductId::generate(),
            name: name.into(),
            description: description.into(),
            price: 1.0,
            category: category.into(),
            in_stock,
            created_at: now,
            updated_at: now,
        }
    }

    fn numbered(n: usize) -> Vec<Product> {
        (0..n)
            .map(|i| product(&format!("item-{i}"), "", "Misc", true))
            .collect()
    }

    #[test]
    fn category_match_ignores_case() {
        let filter = ProductFilter::default().category("kitchen").compile(true);
        assert!(filter.matches(&product("Mug", "", "Kitchen", true)));
        assert!(!filter.matches(&product("Mug", "", "Kitchenware", true)));
    }

    #[test]
    fn blank_criteria_are_ignored() {
        let filter = ProductFilter {
            category: Some("  ".into()),
            in_stock: None,
            search: Some(String::new()),
        }
        .compile(true);
        assert!(filter.matches(&product("Anything", "", "Any", false)));
    }

    #[test]
    fn description_search_follows_flag() {
        let mug = product("Coffee Mug", "Ceramic mug", "Kitchen", true);
        assert!(TextMatcher::new("CERAMIC", true).matches(&mug));
        assert!(!TextMatcher::new("ceramic", false).matches(&mug));
        assert!(TextMatcher::new("mug", false).matches(&mug));
    }

    #[test]
    fn page_request_rejects_zero() {
        assert!(matches!(
            PageRequest::new(0, 5),
            Err(CatalogError::InvalidArgument(_))
        ));
        assert!(matches!(
            PageRequest::new(1, 0),
            Err(CatalogError::InvalidArgument(_))
        ));
    }

    #[test]
    fn paginate_middle_page() {
        let page = paginate(numbered(12), PageRequest::new(2, 5).unwrap());
        let names: Vec<_> = page.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["item-5", "item-6", "item-7", "item-8", "item-9"]);
        assert_eq!(page.total_matching, 12);
        assert_eq!(page.page_info.total_pages, 3);
        assert!(page.page_info.has_next);
        assert!(page.page_info.has_prev);
    }

    #[test]
    fn paginate_last_partial_page() {
        let page = paginate(numbered(12), PageRequest::new(3, 5).unwrap());
        assert_eq!(page.items.len(), 2);
        assert!(!page.page_info.has_next);
    }

    #[test]
    fn paginate_out_of_range_is_empty() {
        let page = paginate(numbered(3), PageRequest::new(9, 5).unwrap());
        assert!(page.items.is_empty());
        assert_eq!(page.total_matching, 3);
        assert_eq!(page.page_info.total_pages, 1);
        assert!(!page.page_info.has_next);
    }

    #[test]
    fn paginate_empty_input() {
        let page = paginate(Vec::new(), PageRequest::first(10));
        assert_eq!(page.page_info.total_pages, 0);
        assert!(!page.page_info.has_prev);
    }

    #[test]
    fn clamp_limit_caps_page_size() {
        let request = PageRequest::new(1, 500).unwrap().clamp_limit(100);
        assert_eq!(request.limit, 100);
    }
}
