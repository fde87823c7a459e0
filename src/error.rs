//! Error types produced by the catalog.
//!
//! Every failing catalog operation reports exactly one [`CatalogError`]
//! variant so that callers can map it to a transport status without
//! inspecting message text.
//!
//! | Error | Raised by | Suggested status |
//! |-------|-----------|------------------|
//! | [`NotFound`](CatalogError::NotFound) | `get`, `update`, `delete` | 404 |
//! | [`Validation`](CatalogError::Validation) | `create`, `update`, JSON decoding | 400 |
//! | [`InvalidArgument`](CatalogError::InvalidArgument) | `search`, page requests | 400 |
//! | [`Internal`](CatalogError::Internal) | poisoned store lock | 500 |
//!
//! ```rust
//! use catalog::CatalogError;
//!
//! let err = CatalogError::not_found("p-1");
//! assert_eq!(err.http_status_code(), 404);
//! assert_eq!(err.to_string(), "product p-1 not found");
//! ```
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single problem with one input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors that can occur while querying or mutating the catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    /// No live product carries the referenced id.
    #[error("product {id} not found")]
    NotFound { id: String },

    /// One or more input fields are missing or out of range.
    ///
    /// The list holds every problem found, not just the first one.
    #[error("validation failed: {}", join_fields(.0))]
    Validation(Vec<FieldError>),

    /// A query argument (search term, page, limit) is malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The store is in an unusable state.
    #[error("internal catalog error: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn not_found(id: impl Into<String>) -> Self {
        CatalogError::NotFound { id: id.into() }
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        CatalogError::InvalidArgument(msg.into())
    }

    pub(crate) fn poisoned() -> Self {
        CatalogError::Internal("product store lock poisoned".to_string())
    }

    /// Field problems carried by a validation failure, empty otherwise.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            CatalogError::Validation(errors) => errors,
            _ => &[],
        }
    }

    /// Returns a suggested HTTP status code for this error.
    ///
    /// ```rust
    /// use catalog::CatalogError;
    ///
    /// assert_eq!(CatalogError::invalid_argument("q").http_status_code(), 400);
    /// assert_eq!(CatalogError::Internal("boom".into()).http_status_code(), 500);
    /// ```
    pub fn http_status_code(&self) -> u16 {
        match self {
            CatalogError::NotFound { .. } => 404,
            CatalogError::Validation(_) | CatalogError::InvalidArgument(_) => 400,
            CatalogError::Internal(_) => 500,
        }
    }
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_every_field() {
        let err = CatalogError::Validation(vec![
            FieldError::new("price", "price is required"),
            FieldError::new("category", "category is required"),
        ]);
        assert_eq!(
            err.to_string(),
            "validation failed: price: price is required; category: category is required"
        );
        assert_eq!(err.field_errors().len(), 2);
    }

    #[test]
    fn non_validation_errors_carry_no_fields() {
        assert!(CatalogError::not_found("x").field_errors().is_empty());
        assert_eq!(CatalogError::poisoned().http_status_code(), 500);
    }
}
