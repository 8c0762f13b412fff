//! Purchasing reports

use super::DateRange;
use crate::models::{Purchase, Supplier};
use crate::money::{to_decimal, to_f64};
use crate::util::parse_flexible_date;
use chrono::FixedOffset;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PurchasesTotal {
    pub total: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SupplierSpending {
    pub supplier: String,
    pub total: f64,
}

/// Purchases dated inside `range` (undated ones only for an unbounded range)
pub fn purchases_in_range<'a>(
    purchases: &'a [Purchase],
    range: &'a DateRange,
    offset: &'a FixedOffset,
) -> impl Iterator<Item = &'a Purchase> + 'a {
    purchases.iter().filter(move |p| {
        let date = p
            .date
            .as_deref()
            .and_then(|d| parse_flexible_date(d, offset));
        range.contains_opt(date)
    })
}

pub fn purchases_total(
    purchases: &[Purchase],
    range: &DateRange,
    offset: &FixedOffset,
) -> PurchasesTotal {
    let (total, count) = purchases_in_range(purchases, range, offset)
        .fold((Decimal::ZERO, 0), |(sum, n), p| (sum + to_decimal(p.total), n + 1));
    PurchasesTotal {
        total: to_f64(total),
        count,
    }
}

/// Spending per supplier name, highest first.
///
/// Unknown or deleted suppliers are reported as `ID <supplierId>`.
pub fn purchases_by_supplier(
    purchases: &[Purchase],
    suppliers: &[Supplier],
    range: &DateRange,
    offset: &FixedOffset,
) -> Vec<SupplierSpending> {
    let names: HashMap<u64, String> = suppliers
        .iter()
        .map(|s| (s.id, s.display_name()))
        .collect();

    let mut totals: HashMap<String, Decimal> = HashMap::new();
    for purchase in purchases_in_range(purchases, range, offset) {
        let key = match purchase.supplier_id {
            Some(id) => names
                .get(&id)
                .cloned()
                .unwrap_or_else(|| format!("ID {id}")),
            None => "ID -".to_string(),
        };
        *totals.entry(key).or_default() += to_decimal(purchase.total);
    }

    let mut rows: Vec<(String, Decimal)> = totals.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rows.into_iter()
        .map(|(supplier, total)| SupplierSpending {
            supplier,
            total: to_f64(total),
        })
        .collect()
}
