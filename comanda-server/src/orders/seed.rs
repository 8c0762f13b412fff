//! 演示数据
//!
//! `SEED_DEMO_DATA=true` 且订单文件为空时写入两条已结账订单，
//! 方便报表页面在新环境中直接有数据可看。

use crate::store::{OrderStore, StoreResult};
use chrono::{DateTime, Duration, Utc};
use shared::order::{ItemStatus, LineItem, Order, OrderStatus, recompute_total};

fn delivered(id: u64, name: &str, unit_price: f64, quantity: u32) -> LineItem {
    LineItem {
        id,
        name: name.to_string(),
        unit_price,
        quantity,
        item_status: ItemStatus::Delivered,
    }
}

fn closed_order(
    id: u64,
    closed_at: DateTime<Utc>,
    scheduling_code: &str,
    items: Vec<LineItem>,
    payment_method: &str,
    note: &str,
) -> Order {
    let mut order = Order {
        id,
        created_at: closed_at - Duration::minutes(45),
        scheduling_code: scheduling_code.to_string(),
        status: OrderStatus::Closed,
        items,
        total: 0.0,
        note: note.to_string(),
        closed_at: Some(closed_at),
        payment_method: Some(payment_method.to_string()),
    };
    recompute_total(&mut order);
    order
}

/// Two paid tickets: yesterday (31,00 card) and today (81,00 cash)
pub fn demo_orders(now: DateTime<Utc>) -> Vec<Order> {
    vec![
        closed_order(
            1,
            now - Duration::days(1),
            "10",
            vec![
                delivered(1, "Refrigerante 2L", 5.0, 3),
                delivered(2, "Suco Natural", 8.0, 2),
            ],
            "Cartão",
            "",
        ),
        closed_order(
            2,
            now,
            "03",
            vec![
                delivered(1, "Pizza Margherita", 45.0, 1),
                delivered(2, "Açaí", 18.0, 2),
            ],
            "Dinheiro",
            "Com gelo",
        ),
    ]
}

/// Write the demo orders if the collection is empty; returns how many were written
pub async fn seed_if_empty(store: &OrderStore) -> StoreResult<usize> {
    store
        .mutate(|orders| {
            if !orders.is_empty() {
                return Ok(0);
            }
            orders.extend(demo_orders(Utc::now()));
            Ok(orders.len())
        })
        .await
}
