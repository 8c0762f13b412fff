//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits are chosen based on:
//! - Kitchen ticket readability for item names
//! - Reasonable UX limits for notes and codes
//! - The menu CSV being `;`-delimited and line-based

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::MenuItemInput;
use shared::models::menu::normalize_category;
use shared::money::{validate_price, validate_quantity};
use shared::order::{ItemInput, NewItem};
use shared::util::parse_number;
use serde_json::Value;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: menu items, line items, categories
pub const MAX_NAME_LEN: usize = 200;

/// Notes and free text
pub const MAX_NOTE_LEN: usize = 500;

/// Scheduling codes, payment methods
pub const MAX_SHORT_TEXT_LEN: usize = 100;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            format!("{field} must not be empty"),
        )
        .with_detail("field", field));
    }
    validate_max_len(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(value: &Option<String>, field: &str, max_len: usize) -> AppResult<()> {
    match value {
        Some(v) => validate_max_len(v, field, max_len),
        None => Ok(()),
    }
}

fn validate_max_len(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Reject characters that would break a `;`-delimited line
fn validate_csv_safe(value: &str, field: &str) -> AppResult<()> {
    if value.contains([';', '\n', '\r']) {
        return Err(AppError::with_message(
            ErrorCode::InvalidFormat,
            format!("{field} must not contain ';' or line breaks"),
        )
        .with_detail("field", field));
    }
    Ok(())
}

/// Read a required numeric field sent as number or numeric string
fn require_number(value: Option<&Value>, field: &str) -> AppResult<f64> {
    let value = value.filter(|v| !v.is_null()).ok_or_else(|| {
        AppError::with_message(ErrorCode::RequiredField, format!("{field} is required"))
            .with_detail("field", field)
    })?;
    parse_number(value).ok_or_else(|| {
        AppError::with_message(
            ErrorCode::InvalidFormat,
            format!("{field} must be a number, got {value}"),
        )
        .with_detail("field", field)
    })
}

// ── Order items ─────────────────────────────────────────────────────

/// Validate one line item of a create/add request
pub fn validate_item(input: &ItemInput) -> AppResult<NewItem> {
    let name = input.name.as_deref().unwrap_or_default();
    validate_required_text(name, "name", MAX_NAME_LEN)?;

    let unit_price = validate_price(require_number(input.unit_price.as_ref(), "price")?, "price")?;

    let quantity = require_number(input.quantity.as_ref(), "quantity")?;
    if quantity.fract() != 0.0 {
        return Err(AppError::validation(format!(
            "quantity must be an integer, got {quantity}"
        ))
        .with_detail("field", "quantity"));
    }
    let quantity = validate_quantity(quantity as i64)?;

    Ok(NewItem {
        name: name.trim().to_string(),
        unit_price,
        quantity,
    })
}

/// Validate every item; the index of the offending item is reported
pub fn validate_items(inputs: &[ItemInput]) -> AppResult<Vec<NewItem>> {
    inputs
        .iter()
        .enumerate()
        .map(|(index, input)| validate_item(input).map_err(|e| e.with_detail("item_index", index)))
        .collect()
}

// ── Menu ────────────────────────────────────────────────────────────

/// Validated menu fields (category already normalized)
#[derive(Debug, Clone, PartialEq)]
pub struct MenuFields {
    pub name: String,
    pub price: f64,
    pub category: String,
}

pub fn validate_menu_item(input: &MenuItemInput) -> AppResult<MenuFields> {
    let name = input.name.as_deref().unwrap_or_default();
    validate_required_text(name, "name", MAX_NAME_LEN)?;
    validate_csv_safe(name, "name")?;

    let price = validate_price(require_number(input.price.as_ref(), "price")?, "price")?;

    let category = input.category.as_deref().unwrap_or_default();
    validate_required_text(category, "category", MAX_NAME_LEN)?;
    validate_csv_safe(category, "category")?;

    Ok(MenuFields {
        name: name.trim().to_string(),
        price,
        category: normalize_category(category),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(body: Value) -> ItemInput {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_validate_item_accepts_strings() {
        let new = validate_item(&item(json!({"name": " Soda ", "price": "5,00", "quantity": "3"})))
            .unwrap();
        assert_eq!(
            new,
            NewItem {
                name: "Soda".to_string(),
                unit_price: 5.0,
                quantity: 3
            }
        );
    }

    #[test]
    fn test_validate_item_rejects_bad_values() {
        let cases = [
            json!({"price": 5, "quantity": 1}),
            json!({"name": "  ", "price": 5, "quantity": 1}),
            json!({"name": "Soda", "quantity": 1}),
            json!({"name": "Soda", "price": "abc", "quantity": 1}),
            json!({"name": "Soda", "price": -1, "quantity": 1}),
            json!({"name": "Soda", "price": 5, "quantity": 0}),
            json!({"name": "Soda", "price": 5, "quantity": 1.5}),
            json!({"name": "Soda", "price": 5, "quantity": 10000}),
        ];
        for case in cases {
            let err = validate_item(&item(case.clone())).unwrap_err();
            assert_eq!(
                err.http_status(),
                http::StatusCode::BAD_REQUEST,
                "case {case} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_items_reports_index() {
        let inputs = vec![
            item(json!({"name": "Soda", "price": 5, "quantity": 1})),
            item(json!({"name": "Soda", "price": 5, "quantity": 0})),
        ];
        let err = validate_items(&inputs).unwrap_err();
        assert_eq!(err.details.unwrap()["item_index"], 1);
    }

    #[test]
    fn test_validate_menu_item() {
        let input: MenuItemInput = serde_json::from_value(
            json!({"nome": "Caipirinha", "preco": "18,5", "categoria": "DRINKS"}),
        )
        .unwrap();
        let fields = validate_menu_item(&input).unwrap();
        assert_eq!(fields.category, "Drinks");
        assert_eq!(fields.price, 18.5);

        let input: MenuItemInput =
            serde_json::from_value(json!({"name": "A;B", "price": 1, "category": "Geral"})).unwrap();
        assert_eq!(validate_menu_item(&input).unwrap_err().code, ErrorCode::InvalidFormat);

        let input: MenuItemInput =
            serde_json::from_value(json!({"name": "A", "price": 1})).unwrap();
        assert_eq!(validate_menu_item(&input).unwrap_err().code, ErrorCode::RequiredField);
    }
}
