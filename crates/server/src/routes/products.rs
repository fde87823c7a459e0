use crate::error::{ServerError, ServerResult};
use crate::routes::{ApiJson, ApiQuery};
use crate::state::ServerState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog::{
    draft_from_json, patch_from_json, CatalogStats, PageInfo, PageRequest, Product, ProductFilter,
    ProductId,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Query parameters for the product listing
///
/// Values arrive as raw strings and are checked in [`ListParams::filter`]
/// and [`ListParams::page_request`] so bad input gets a precise message.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub in_stock: Option<String>,

    #[serde(default)]
    pub search: Option<String>,

    /// Alias for `search`
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub page: Option<String>,

    #[serde(default)]
    pub limit: Option<String>,
}

impl ListParams {
    pub fn filter(&self) -> ServerResult<ProductFilter> {
        Ok(ProductFilter {
            category: non_blank(&self.category),
            in_stock: parse_bool("inStock", self.in_stock.as_deref())?,
            search: non_blank(&self.search).or_else(|| non_blank(&self.name)),
        })
    }

    pub fn page_request(&self, default_limit: usize) -> ServerResult<PageRequest> {
        let page = parse_positive("page", self.page.as_deref())?.unwrap_or(1);
        let limit = parse_positive("limit", self.limit.as_deref())?.unwrap_or(default_limit);
        Ok(PageRequest::new(page, limit)?)
    }
}

/// Filters echoed back with a listing
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedFilters {
    pub category: String,
    pub in_stock: String,
    pub search: String,
}

impl From<&ProductFilter> for AppliedFilters {
    fn from(filter: &ProductFilter) -> Self {
        Self {
            category: filter.category.clone().unwrap_or_else(|| "all".to_string()),
            in_stock: filter
                .in_stock
                .map(|b| b.to_string())
                .unwrap_or_else(|| "all".to_string()),
            search: filter.search.clone().unwrap_or_else(|| "none".to_string()),
        }
    }
}

/// Listing response
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    pub data: Vec<Product>,
    pub pagination: PageInfo,
    pub filters: AppliedFilters,
}

/// Query parameters for text search
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

/// Search response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub data: Vec<Product>,
    pub search_term: String,
    pub total_results: usize,
}

/// Single-product response
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse {
    pub data: Product,
}

/// Mutation response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    pub data: Product,
}

/// List products with filtering and pagination
pub async fn list_products(
    State(state): State<Arc<ServerState>>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ServerResult<Json<ListResponse>> {
    let filter = params.filter()?;
    let request = params.page_request(state.catalog.config().default_page_limit)?;
    let page = state.catalog.list(&filter, request)?;

    Ok(Json(ListResponse {
        data: page.items,
        pagination: page.page_info,
        filters: AppliedFilters::from(&filter),
    }))
}

/// Search products by name and description
pub async fn search_products(
    State(state): State<Arc<ServerState>>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> ServerResult<Json<SearchResponse>> {
    let term = non_blank(&params.q).ok_or_else(|| {
        ServerError::InvalidArgument("Search query parameter \"q\" is required".to_string())
    })?;

    let data = state.catalog.search(&term)?;
    Ok(Json(SearchResponse {
        total_results: data.len(),
        search_term: term,
        data,
    }))
}

/// Aggregate product statistics
pub async fn product_stats(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<Json<CatalogStats>> {
    Ok(Json(state.catalog.stats()?))
}

/// Get a product by id
pub async fn get_product(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> ServerResult<Json<DataResponse>> {
    let data = state.catalog.get(&ProductId::from(id))?;
    Ok(Json(DataResponse { data }))
}

/// Create a product
pub async fn create_product(
    State(state): State<Arc<ServerState>>,
    ApiJson(body): ApiJson<serde_json::Value>,
) -> ServerResult<impl IntoResponse> {
    let draft = draft_from_json(&body)?;
    let data = state.catalog.create(draft)?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Product created successfully".to_string(),
            data,
        }),
    ))
}

/// Partially update a product
pub async fn update_product(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<serde_json::Value>,
) -> ServerResult<Json<MessageResponse>> {
    let id = ProductId::from(id);
    let patch = match patch_from_json(&body) {
        Ok(patch) => patch,
        Err(err) => {
            // An unknown id is reported ahead of body problems.
            state.catalog.get(&id)?;
            return Err(err.into());
        }
    };
    let data = state.catalog.update(&id, patch)?;

    Ok(Json(MessageResponse {
        message: "Product updated successfully".to_string(),
        data,
    }))
}

/// Delete a product
pub async fn delete_product(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> ServerResult<Json<MessageResponse>> {
    let data = state.catalog.delete(&ProductId::from(id))?;

    Ok(Json(MessageResponse {
        message: "Product deleted successfully".to_string(),
        data,
    }))
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_positive(name: &str, value: Option<&str>) -> ServerResult<Option<usize>> {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(raw) => match raw.parse::<usize>() {
            Ok(n) if n > 0 => Ok(Some(n)),
            _ => Err(ServerError::InvalidArgument(format!(
                "{name} must be a positive integer, got '{raw}'"
            ))),
        },
    }
}

fn parse_bool(name: &str, value: Option<&str>) -> ServerResult<Option<bool>> {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some("true") => Ok(Some(true)),
        Some("false") => Ok(Some(false)),
        Some(raw) => Err(ServerError::InvalidArgument(format!(
            "{name} must be 'true' or 'false', got '{raw}'"
        ))),
    }
}
