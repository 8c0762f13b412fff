//! Report aggregations
//!
//! Pure functions over the loaded collections. Day boundaries and hours are
//! computed in a fixed local offset supplied by the caller.

pub mod dashboard;
pub mod finance;
pub mod purchasing;
pub mod sales;

use crate::error::{AppError, AppResult, ErrorCode};
use crate::util::parse_flexible_date;
use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::Deserialize;

pub use dashboard::{DashboardSummary, dashboard, kitchen_queue};
pub use finance::{CashFlow, CashFlowEntry, EntryKind, cash_flow};
pub use purchasing::{PurchasesTotal, SupplierSpending, purchases_by_supplier, purchases_total};
pub use sales::{
    CashMovement, CategorySales, HourlyMovement, SoldItem, TopItem, hourly_movement, movements,
    sales_by_category, sold_items, top_items,
};

/// `?start=YYYY-MM-DD&end=YYYY-MM-DD` query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateRangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Half-open UTC interval covering whole local days
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    /// Exclusive: local midnight after the `end` day
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Build from query parameters; both days are inclusive
    pub fn from_query(query: &DateRangeQuery, offset: &FixedOffset) -> AppResult<Self> {
        let start = parse_day(query.start.as_deref(), "start", offset)?;
        let end = parse_day(query.end.as_deref(), "end", offset)?.map(|d| d + Duration::days(1));
        Ok(Self { start, end })
    }

    pub fn is_bounded(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start.is_none_or(|s| at >= s) && self.end.is_none_or(|e| at < e)
    }

    /// Undated records only match an unbounded range
    pub fn contains_opt(&self, at: Option<DateTime<Utc>>) -> bool {
        match at {
            Some(at) => self.contains(at),
            None => !self.is_bounded(),
        }
    }
}

fn parse_day(
    value: Option<&str>,
    field: &str,
    offset: &FixedOffset,
) -> AppResult<Option<DateTime<Utc>>> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if value.len() != 10 {
        return Err(invalid_day(field, value));
    }
    parse_flexible_date(value, offset)
        .map(Some)
        .ok_or_else(|| invalid_day(field, value))
}

fn invalid_day(field: &str, value: &str) -> AppError {
    AppError::with_message(
        ErrorCode::InvalidFormat,
        format!("{field} must be a date in YYYY-MM-DD format, got {value}"),
    )
    .with_detail("field", field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::offset_from_minutes;

    fn query(start: Option<&str>, end: Option<&str>) -> DateRangeQuery {
        DateRangeQuery {
            start: start.map(str::to_string),
            end: end.map(str::to_string),
        }
    }

    #[test]
    fn test_range_covers_whole_local_days() {
        let brt = offset_from_minutes(-180);
        let range = DateRange::from_query(&query(Some("2025-03-10"), Some("2025-03-10")), &brt)
            .unwrap();

        let at = |s: &str| DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc);
        assert!(!range.contains(at("2025-03-10T02:59:59Z")));
        assert!(range.contains(at("2025-03-10T03:00:00Z")));
        assert!(range.contains(at("2025-03-11T02:59:59Z")));
        assert!(!range.contains(at("2025-03-11T03:00:00Z")));
    }

    #[test]
    fn test_empty_params_are_unbounded() {
        let utc = offset_from_minutes(0);
        let range = DateRange::from_query(&query(Some(""), None), &utc).unwrap();
        assert!(!range.is_bounded());
        assert!(range.contains_opt(None));
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let utc = offset_from_minutes(0);
        let err = DateRange::from_query(&query(Some("10/03/2025"), None), &utc).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);

        let err =
            DateRange::from_query(&query(None, Some("2025-03-10T00:00:00Z")), &utc).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }
}
