//! Cash-flow ledger: order revenue against purchase expenses

use super::DateRange;
use crate::models::Purchase;
use crate::money::{to_decimal, to_f64};
use crate::order::{Order, OrderStatus};
use crate::util::{format_scheduling_code, parse_flexible_date};
use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryKind {
    Revenue,
    Expense,
}

/// Ledger line. Expenses carry negative amounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowEntry {
    /// `R-<orderId>` or `C-<purchaseId>`
    pub id: String,
    pub source_id: u64,
    pub kind: EntryKind,
    pub date: Option<DateTime<Utc>>,
    pub description: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CashFlow {
    pub entries: Vec<CashFlowEntry>,
    pub total_in: f64,
    /// Magnitude of expenses (positive)
    pub total_out: f64,
    pub profit: f64,
}

/// Build the ledger, newest first; undated entries sort last
pub fn cash_flow(
    orders: &[Order],
    purchases: &[Purchase],
    range: &DateRange,
    offset: &FixedOffset,
) -> CashFlow {
    let revenue = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Closed && range.contains_opt(o.closed_at))
        .map(|o| CashFlowEntry {
            id: format!("R-{}", o.id),
            source_id: o.id,
            kind: EntryKind::Revenue,
            date: o.closed_at,
            description: format!(
                "Order #{} (scheduling {}) - {}",
                o.id,
                format_scheduling_code(&o.scheduling_code)
                    .unwrap_or_else(|| o.scheduling_code.clone()),
                o.payment_method.as_deref().unwrap_or("-")
            ),
            amount: o.total,
        });

    let expenses = purchases.iter().filter_map(|p| {
        let date = p.date.as_deref().and_then(|d| parse_flexible_date(d, offset));
        range.contains_opt(date).then(|| CashFlowEntry {
            id: format!("C-{}", p.id),
            source_id: p.id,
            kind: EntryKind::Expense,
            date,
            description: format!(
                "Purchase: {} (purchase {})",
                p.description.as_deref().unwrap_or("miscellaneous items"),
                p.id
            ),
            amount: -p.total.abs(),
        })
    });

    let mut entries: Vec<CashFlowEntry> = revenue.chain(expenses).collect();
    // None < Some, so reversing the date order puts undated entries last
    entries.sort_by(|a, b| b.date.cmp(&a.date));

    let (total_in, total_out) =
        entries
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(inflow, outflow), e| match e.kind {
                EntryKind::Revenue => (inflow + to_decimal(e.amount), outflow),
                EntryKind::Expense => (inflow, outflow + to_decimal(e.amount).abs()),
            });

    CashFlow {
        entries,
        total_in: to_f64(total_in),
        total_out: to_f64(total_out),
        profit: to_f64(total_in - total_out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PurchaseInput;
    use crate::util::offset_from_minutes;
    use serde_json::json;

    fn closed(id: u64, total: f64, closed_at: &str) -> Order {
        let at = DateTime::parse_from_rfc3339(closed_at)
            .unwrap()
            .with_timezone(&Utc);
        Order {
            id,
            created_at: at,
            scheduling_code: "00".to_string(),
            status: OrderStatus::Closed,
            items: vec![],
            total,
            note: String::new(),
            closed_at: Some(at),
            payment_method: Some("Cash".to_string()),
        }
    }

    fn purchase(id: u64, body: serde_json::Value) -> Purchase {
        let input: PurchaseInput = serde_json::from_value(body).unwrap();
        Purchase::from_input(id, input).unwrap()
    }

    #[test]
    fn test_cash_flow_totals_and_order() {
        let utc = offset_from_minutes(0);
        let mut open = closed(3, 500.0, "2025-03-10T00:00:00Z");
        open.status = OrderStatus::InConsumption;
        open.closed_at = None;

        let orders = vec![
            closed(1, 31.0, "2025-03-08T20:00:00Z"),
            closed(2, 81.0, "2025-03-10T20:00:00Z"),
            open,
        ];
        let purchases = vec![
            purchase(1, json!({"date": "2025-03-09", "total": 40})),
            purchase(2, json!({"total": 2.5})),
        ];

        let flow = cash_flow(&orders, &purchases, &DateRange::unbounded(), &utc);
        let ids: Vec<&str> = flow.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["R-2", "C-1", "R-1", "C-2"]);
        assert_eq!(flow.entries[1].amount, -40.0);
        assert_eq!(flow.total_in, 112.0);
        assert_eq!(flow.total_out, 42.5);
        assert_eq!(flow.profit, 69.5);
    }
}
