//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted to `f64`
//! for storage/serialization.

use crate::error::{AppError, AppResult};
use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed unit price
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line item
pub const MAX_QUANTITY: i64 = 9999;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// `unit_price × quantity` with decimal precision
pub fn line_total(unit_price: f64, quantity: u32) -> Decimal {
    to_decimal(unit_price) * Decimal::from(quantity)
}

/// Sum a sequence of f64 amounts with decimal precision
pub fn sum(values: impl IntoIterator<Item = f64>) -> f64 {
    to_f64(values.into_iter().map(to_decimal).sum())
}

/// Validate a unit price: finite, non-negative and below [`MAX_PRICE`]
pub fn validate_price(value: f64, field: &str) -> AppResult<f64> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "{field} must be a finite number, got {value}"
        ))
        .with_detail("field", field));
    }
    if value < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be non-negative, got {value}"
        ))
        .with_detail("field", field));
    }
    if value > MAX_PRICE {
        return Err(AppError::validation(format!(
            "{field} exceeds maximum allowed ({MAX_PRICE}), got {value}"
        ))
        .with_detail("field", field));
    }
    Ok(value)
}

/// Validate a quantity: positive and at most [`MAX_QUANTITY`]
pub fn validate_quantity(value: i64) -> AppResult<u32> {
    if value <= 0 {
        return Err(AppError::validation(format!(
            "quantity must be positive, got {value}"
        ))
        .with_detail("field", "quantity"));
    }
    if value > MAX_QUANTITY {
        return Err(AppError::validation(format!(
            "quantity exceeds maximum allowed ({MAX_QUANTITY}), got {value}"
        ))
        .with_detail("field", "quantity"));
    }
    // bounded by MAX_QUANTITY above
    Ok(value as u32)
}
