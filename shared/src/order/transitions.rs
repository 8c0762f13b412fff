//! Order transition detection
//!
//! Pure diff between two successive views of the open orders. The caller
//! owns the snapshot and feeds it back on the next poll.

use super::status::OrderStatus;
use super::types::Order;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Status of every non-closed order at one point in time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    statuses: HashMap<u64, OrderStatus>,
}

impl StatusSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot directly from the orders (no diff)
    pub fn from_orders(orders: &[Order]) -> Self {
        Self {
            statuses: orders
                .iter()
                .filter(|o| !o.is_closed())
                .map(|o| (o.id, o.status))
                .collect(),
        }
    }

    pub fn get(&self, id: u64) -> Option<OrderStatus> {
        self.statuses.get(&id).copied()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.statuses.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

/// Something the floor staff should be told about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderTransition {
    /// A ticket with items appeared
    #[serde(rename_all = "camelCase")]
    NewOrder {
        order_id: u64,
        scheduling_code: String,
        item_count: usize,
    },
    /// Kitchen finished: PREPARING → READY
    #[serde(rename_all = "camelCase")]
    OrderReady {
        order_id: u64,
        scheduling_code: String,
    },
    /// Ticket closed or deleted since the last poll
    #[serde(rename_all = "camelCase")]
    OrderGone { order_id: u64 },
}

/// Diff `current` against `previous`.
///
/// Returns the transitions (new orders, then ready orders in input order,
/// then gone orders by ascending id) and the snapshot for the next call.
pub fn detect_transitions(
    previous: &StatusSnapshot,
    current: &[Order],
) -> (Vec<OrderTransition>, StatusSnapshot) {
    let mut transitions = Vec::new();
    let mut ready = Vec::new();

    for order in current.iter().filter(|o| !o.is_closed()) {
        match previous.get(order.id) {
            None if !order.items.is_empty() => {
                transitions.push(OrderTransition::NewOrder {
                    order_id: order.id,
                    scheduling_code: order.scheduling_code.clone(),
                    item_count: order.items.len(),
                });
            }
            Some(OrderStatus::Preparing) if order.status == OrderStatus::Ready => {
                ready.push(OrderTransition::OrderReady {
                    order_id: order.id,
                    scheduling_code: order.scheduling_code.clone(),
                });
            }
            _ => {}
        }
    }
    transitions.extend(ready);

    let next = StatusSnapshot::from_orders(current);

    let mut gone: Vec<u64> = previous
        .statuses
        .keys()
        .filter(|id| !next.contains(**id))
        .copied()
        .collect();
    gone.sort_unstable();
    transitions.extend(
        gone.into_iter()
            .map(|order_id| OrderTransition::OrderGone { order_id }),
    );

    (transitions, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{ItemStatus, LineItem};
    use chrono::Utc;

    fn order(id: u64, status: OrderStatus, item_count: usize) -> Order {
        Order {
            id,
            created_at: Utc::now(),
            scheduling_code: format!("code-{id}"),
            status,
            items: (1..=item_count as u64)
                .map(|i| LineItem {
                    id: i,
                    name: "Soda".to_string(),
                    unit_price: 5.0,
                    quantity: 1,
                    item_status: ItemStatus::Preparing,
                })
                .collect(),
            total: 0.0,
            note: String::new(),
            closed_at: None,
            payment_method: None,
        }
    }

    #[test]
    fn test_new_order_needs_items() {
        let previous = StatusSnapshot::new();
        let current = vec![
            order(1, OrderStatus::Preparing, 2),
            order(2, OrderStatus::Open, 0),
        ];
        let (events, next) = detect_transitions(&previous, &current);
        assert_eq!(
            events,
            vec![OrderTransition::NewOrder {
                order_id: 1,
                scheduling_code: "code-1".to_string(),
                item_count: 2,
            }]
        );
        // empty order is still tracked
        assert!(next.contains(2));
    }

    #[test]
    fn test_empty_order_gaining_items_is_not_new() {
        let previous = StatusSnapshot::from_orders(&[order(2, OrderStatus::Open, 0)]);
        let (events, _) = detect_transitions(&previous, &[order(2, OrderStatus::Preparing, 1)]);
        assert!(events.is_empty());
    }

    #[test]
    fn test_order_ready_only_from_preparing() {
        let previous = StatusSnapshot::from_orders(&[
            order(1, OrderStatus::Preparing, 1),
            order(2, OrderStatus::InConsumption, 1),
        ]);
        let current = vec![
            order(1, OrderStatus::Ready, 1),
            order(2, OrderStatus::Ready, 1),
        ];
        let (events, _) = detect_transitions(&previous, &current);
        assert_eq!(
            events,
            vec![OrderTransition::OrderReady {
                order_id: 1,
                scheduling_code: "code-1".to_string(),
            }]
        );
    }

    #[test]
    fn test_closed_and_deleted_orders_are_gone() {
        let previous = StatusSnapshot::from_orders(&[
            order(1, OrderStatus::Preparing, 1),
            order(2, OrderStatus::InConsumption, 1),
            order(3, OrderStatus::Ready, 1),
        ]);
        let current = vec![order(2, OrderStatus::Closed, 1), order(3, OrderStatus::Ready, 1)];
        let (events, next) = detect_transitions(&previous, &current);
        assert_eq!(
            events,
            vec![
                OrderTransition::OrderGone { order_id: 1 },
                OrderTransition::OrderGone { order_id: 2 },
            ]
        );
        assert_eq!(next.len(), 1);
        assert!(!next.contains(2));
    }

    #[test]
    fn test_unchanged_orders_emit_nothing() {
        let orders = vec![order(1, OrderStatus::Preparing, 1)];
        let previous = StatusSnapshot::from_orders(&orders);
        let (events, next) = detect_transitions(&previous, &orders);
        assert!(events.is_empty());
        assert_eq!(next, previous);
    }

    #[test]
    fn test_transition_wire_format() {
        let value = serde_json::to_value(OrderTransition::OrderGone { order_id: 4 }).unwrap();
        assert_eq!(value, serde_json::json!({"type": "ORDER_GONE", "orderId": 4}));
    }
}
