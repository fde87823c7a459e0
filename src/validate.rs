//! Field checks for create/update input and decoding of JSON request bodies.
//!
//! Decoding happens field-by-field from a JSON object so a wrong type on one
//! field becomes a [`FieldError`] rather than a whole-body parse failure.
//! Presence and range checks run afterwards in [`check_draft`] and
//! [`check_patch`]; both collect every problem before failing.
use serde_json::{Map, Value};

use crate::error::{CatalogError, FieldError};
use crate::product::{ProductDraft, ProductPatch};

const IMMUTABLE_FIELDS: [&str; 3] = ["id", "createdAt", "updatedAt"];

/// Checks a create draft: `name`, `price` and `category` are required.
pub fn check_draft(draft: &ProductDraft) -> Result<(), CatalogError> {
    let mut errors = Vec::new();

    match &draft.name {
        None => errors.push(FieldError::new("name", "name is required")),
        Some(name) => check_text("name", name, &mut errors),
    }
    match draft.price {
        None => errors.push(FieldError::new("price", "price is required")),
        Some(price) => check_price(price, &mut errors),
    }
    match &draft.category {
        None => errors.push(FieldError::new("category", "category is required")),
        Some(category) => check_text("category", category, &mut errors),
    }

    finish(errors)
}

/// Checks the supplied fields of a patch. An empty patch is rejected.
pub fn check_patch(patch: &ProductPatch) -> Result<(), CatalogError> {
    let mut errors = Vec::new();

    if patch.is_empty() {
        errors.push(FieldError::new(
            "body",
            "at least one updatable field is required",
        ));
    }
    if let Some(name) = &patch.name {
        check_text("name", name, &mut errors);
    }
    if let Some(price) = patch.price {
        check_price(price, &mut errors);
    }
    if let Some(category) = &patch.category {
        check_text("category", category, &mut errors);
    }

    finish(errors)
}

/// Decodes a create body. Type mismatches are reported per field; presence
/// is left to [`check_draft`].
pub fn draft_from_json(body: &Value) -> Result<ProductDraft, CatalogError> {
    let object = as_object(body)?;
    let mut errors = Vec::new();

    let draft = ProductDraft {
        name: string_field(object, "name", &mut errors),
        description: string_field(object, "description", &mut errors),
        price: number_field(object, "price", &mut errors),
        category: string_field(object, "category", &mut errors),
        in_stock: bool_field(object, "inStock", &mut errors),
    };

    finish(errors).map(|()| draft)
}

/// Decodes an update body. Server-assigned fields are refused.
pub fn patch_from_json(body: &Value) -> Result<ProductPatch, CatalogError> {
    let object = as_object(body)?;
    let mut errors = Vec::new();

    for field in IMMUTABLE_FIELDS {
        if object.contains_key(field) {
            errors.push(FieldError::new(field, format!("{field} cannot be modified")));
        }
    }

    let patch = ProductPatch {
        name: string_field(object, "name", &mut errors),
        description: string_field(object, "description", &mut errors),
        price: number_field(object, "price", &mut errors),
        category: string_field(object, "category", &mut errors),
        in_stock: bool_field(object, "inStock", &mut errors),
    };

    finish(errors).map(|()| patch)
}

fn finish(errors: Vec<FieldError>) -> Result<(), CatalogError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(CatalogError::Validation(errors))
    }
}

fn check_text(field: &str, value: &str, errors: &mut Vec<FieldError>) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{field} must not be empty")));
    }
}

fn check_price(price: f64, errors: &mut Vec<FieldError>) {
    if !price.is_finite() {
        errors.push(FieldError::new("price", "price must be a finite number"));
    } else if price < 0.0 {
        errors.push(FieldError::new("price", "price must not be negative"));
    }
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, CatalogError> {
    body.as_object().ok_or_else(|| {
        CatalogError::Validation(vec![FieldError::new(
            "body",
            "request body must be a JSON object",
        )])
    })
}

fn string_field(
    object: &Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match object.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError::new(field, format!("{field} must be a string")));
            None
        }
    }
}

fn number_field(
    object: &Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<f64> {
    match object.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => n.as_f64(),
        Some(_) => {
            errors.push(FieldError::new(field, format!("{field} must be a number")));
            None
        }
    }
}

fn bool_field(
    object: &Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<bool> {
    match object.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::Bool(b)) => Some(*b),
        Some(_) => {
            errors.push(FieldError::new(field, format!("{field} must be a boolean")));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(err: CatalogError) -> Vec<String> {
        err.field_errors().iter().map(|e| e.field.clone()).collect()
    }

    #[test]
    fn draft_missing_price_and_category_lists_both() {
        let draft = draft_from_json(&json!({"name": "Desk"})).unwrap();
        let err = check_draft(&draft).unwrap_err();
        assert_eq!(fields(err), vec!["price", "category"]);
    }

    #[test]
    fn draft_rejects_negative_price_and_blank_name() {
        let draft = ProductDraft::new("  ", -1.0, "Office");
        let err = check_draft(&draft).unwrap_err();
        assert_eq!(fields(err), vec!["name", "price"]);
    }

    #[test]
    fn wrong_types_are_field_errors() {
        let err = draft_from_json(&json!({
            "name": 7,
            "price": "cheap",
            "category": "Office",
            "inStock": "yes"
        }))
        .unwrap_err();
        assert_eq!(fields(err), vec!["name", "price", "inStock"]);
    }

    #[test]
    fn null_counts_as_absent() {
        let draft = draft_from_json(&json!({"name": "Desk", "description": null})).unwrap();
        assert_eq!(draft.description, None);
    }

    #[test]
    fn non_object_body_is_rejected() {
        let err = draft_from_json(&json!(["Desk"])).unwrap_err();
        assert_eq!(fields(err), vec!["body"]);
    }

    #[test]
    fn patch_refuses_server_assigned_fields() {
        let err = patch_from_json(&json!({"id": "x", "createdAt": "now", "price": 2.0}))
            .unwrap_err();
        assert_eq!(fields(err), vec!["id", "createdAt"]);
    }

    #[test]
    fn empty_patch_is_rejected() {
        let patch = patch_from_json(&json!({"unknown": 1})).unwrap();
        let err = check_patch(&patch).unwrap_err();
        assert_eq!(fields(err), vec!["body"]);
    }

    #[test]
    fn partial_patch_passes() {
        let patch = patch_from_json(&json!({"price": 5})).unwrap();
        assert_eq!(patch.price, Some(5.0));
        assert!(check_patch(&patch).is_ok());
    }
}
