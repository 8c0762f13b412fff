//! Floor views: kitchen queue and dashboard counters

use crate::money::{to_decimal, to_f64};
use crate::order::{ItemStatus, Order};
use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub open_orders: usize,
    /// OPEN and PREPARING items of non-closed orders
    pub items_preparing: usize,
    pub items_ready: usize,
    /// Totals of orders closed on the current local day
    pub revenue_today: f64,
}

/// Non-closed orders the kitchen still has to act on, oldest first
pub fn kitchen_queue(orders: &[Order]) -> Vec<Order> {
    let mut queue: Vec<Order> = orders
        .iter()
        .filter(|o| !o.is_closed() && o.has_pending_items())
        .cloned()
        .collect();
    queue.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    queue
}

pub fn dashboard(orders: &[Order], now: DateTime<Utc>, offset: &FixedOffset) -> DashboardSummary {
    let today = now.with_timezone(offset).date_naive();
    let mut summary = DashboardSummary::default();
    let mut revenue = Decimal::ZERO;

    for order in orders {
        if order.is_closed() {
            if order
                .closed_at
                .is_some_and(|at| at.with_timezone(offset).date_naive() == today)
            {
                revenue += to_decimal(order.total);
            }
            continue;
        }
        summary.open_orders += 1;
        for item in &order.items {
            match item.item_status {
                ItemStatus::Open | ItemStatus::Preparing => summary.items_preparing += 1,
                ItemStatus::Ready => summary.items_ready += 1,
                ItemStatus::Delivered | ItemStatus::Cancelled => {}
            }
        }
    }

    summary.revenue_today = to_f64(revenue);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{LineItem, OrderStatus};
    use crate::util::offset_from_minutes;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn order(id: u64, created: &str, statuses: &[ItemStatus]) -> Order {
        let items: Vec<LineItem> = statuses
            .iter()
            .enumerate()
            .map(|(i, s)| LineItem {
                id: i as u64 + 1,
                name: "Soda".to_string(),
                unit_price: 5.0,
                quantity: 1,
                item_status: *s,
            })
            .collect();
        Order {
            id,
            created_at: at(created),
            scheduling_code: "00".to_string(),
            status: crate::order::derive_status(&items),
            total: crate::order::lifecycle::compute_total(&items),
            items,
            note: String::new(),
            closed_at: None,
            payment_method: None,
        }
    }

    fn closed(id: u64, total: f64, closed_at: &str) -> Order {
        let mut o = order(id, closed_at, &[ItemStatus::Delivered]);
        o.status = OrderStatus::Closed;
        o.total = total;
        o.closed_at = Some(at(closed_at));
        o
    }

    #[test]
    fn test_kitchen_queue() {
        let orders = vec![
            order(1, "2025-03-10T12:05:00Z", &[ItemStatus::Ready]),
            order(2, "2025-03-10T12:00:00Z", &[ItemStatus::Preparing]),
            order(3, "2025-03-10T11:00:00Z", &[ItemStatus::Delivered]),
            closed(4, 10.0, "2025-03-10T10:00:00Z"),
        ];
        let ids: Vec<u64> = kitchen_queue(&orders).iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_dashboard_counts_and_local_day_revenue() {
        let brt = offset_from_minutes(-180);
        let now = at("2025-03-10T15:00:00Z");
        let orders = vec![
            order(
                1,
                "2025-03-10T12:00:00Z",
                &[ItemStatus::Open, ItemStatus::Preparing, ItemStatus::Ready],
            ),
            order(2, "2025-03-10T12:00:00Z", &[ItemStatus::Delivered]),
            // 2025-03-10 01:00 local
            closed(3, 31.0, "2025-03-10T04:00:00Z"),
            // 2025-03-09 23:30 local
            closed(4, 81.0, "2025-03-10T02:30:00Z"),
        ];
        let summary = dashboard(&orders, now, &brt);
        assert_eq!(
            summary,
            DashboardSummary {
                open_orders: 2,
                items_preparing: 2,
                items_ready: 1,
                revenue_today: 31.0,
            }
        );
    }
}
