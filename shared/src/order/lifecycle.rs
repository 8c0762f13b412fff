//! Order lifecycle engine
//!
//! The order status is never set by clients: it is derived from the item
//! statuses after every item mutation. Only [`OrderStatus::Closed`] is set
//! explicitly, and once closed the order is frozen.
//!
//! ```text
//! OPEN → PREPARING ⇄ READY → (all items delivered) → IN_CONSUMPTION → CLOSED
//! ```

use super::status::{ItemStatus, OrderStatus};
use super::types::{LineItem, Order};
use crate::money;

/// Precedence of active item statuses: the first row with a matching item wins.
///
/// `OPEN` items count as queued for the kitchen, so an order holding only
/// `OPEN` items reads as `PREPARING`.
pub const STATUS_PRECEDENCE: [(ItemStatus, OrderStatus); 3] = [
    (ItemStatus::Ready, OrderStatus::Ready),
    (ItemStatus::Preparing, OrderStatus::Preparing),
    (ItemStatus::Open, OrderStatus::Preparing),
];

/// Derive the order status from its items (never yields `CLOSED`)
pub fn derive_status(items: &[LineItem]) -> OrderStatus {
    if items.is_empty() {
        return OrderStatus::Open;
    }

    let active: Vec<ItemStatus> = items
        .iter()
        .map(|i| i.item_status)
        .filter(|s| !s.is_resolved())
        .collect();

    if active.is_empty() {
        return OrderStatus::InConsumption;
    }

    STATUS_PRECEDENCE
        .iter()
        .find(|(item_status, _)| active.contains(item_status))
        .map(|(_, order_status)| *order_status)
        .unwrap_or(OrderStatus::Open)
}

/// Recompute `order.status` in place. Closed orders are left untouched.
pub fn recompute_status(order: &mut Order) {
    if order.is_closed() {
        return;
    }
    order.status = derive_status(&order.items);
}

/// Σ quantity × unit_price with decimal precision, cancelled items included
pub fn compute_total(items: &[LineItem]) -> f64 {
    money::to_f64(
        items
            .iter()
            .map(|i| money::line_total(i.unit_price, i.quantity))
            .sum(),
    )
}

/// Recompute `order.total` in place
pub fn recompute_total(order: &mut Order) {
    order.total = compute_total(&order.items);
}
