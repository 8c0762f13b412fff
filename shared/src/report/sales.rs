//! Sales reports over closed orders

use super::DateRange;
use crate::models::MenuItem;
use crate::models::menu::normalize_category;
use crate::money::{line_total, to_decimal, to_f64};
use crate::order::{ItemStatus, Order, OrderStatus};
use chrono::{DateTime, FixedOffset, Timelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Category for sold items missing from the menu
pub const UNKNOWN_CATEGORY: &str = "Outros";

/// Number of rows in the top items report
pub const TOP_ITEMS_LIMIT: usize = 10;

/// Cash-in entry: one per closed order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CashMovement {
    pub order_id: u64,
    pub closed_at: DateTime<Utc>,
    pub payment_method: Option<String>,
    pub total: f64,
    pub scheduling_code: String,
    pub status: OrderStatus,
}

/// One non-cancelled line of a closed order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SoldItem {
    pub closed_at: DateTime<Utc>,
    pub item_name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub item_total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategorySales {
    pub category: String,
    pub total: f64,
    /// Share of the overall revenue, 0..=100
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopItem {
    pub item_name: String,
    pub quantity: u64,
    pub revenue: f64,
    /// Last unit price seen for the item
    pub unit_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HourlyMovement {
    /// `HH:00` in local time
    pub hour: String,
    pub items_sold: u64,
}

fn closed_in_range<'a>(
    orders: &'a [Order],
    range: &'a DateRange,
) -> impl Iterator<Item = (&'a Order, DateTime<Utc>)> + 'a {
    orders.iter().filter_map(move |o| {
        let closed_at = o.closed_at?;
        (o.status == OrderStatus::Closed && range.contains(closed_at)).then_some((o, closed_at))
    })
}

/// Closed orders as cash-in movements, in storage order
pub fn movements(orders: &[Order], range: &DateRange) -> Vec<CashMovement> {
    closed_in_range(orders, range)
        .map(|(o, closed_at)| CashMovement {
            order_id: o.id,
            closed_at,
            payment_method: o.payment_method.clone(),
            total: o.total,
            scheduling_code: o.scheduling_code.clone(),
            status: o.status,
        })
        .collect()
}

/// Flatten closed orders into their sold lines (cancelled items excluded)
pub fn sold_items(orders: &[Order], range: &DateRange) -> Vec<SoldItem> {
    closed_in_range(orders, range)
        .flat_map(|(o, closed_at)| {
            o.items
                .iter()
                .filter(|i| i.item_status != ItemStatus::Cancelled)
                .map(move |i| SoldItem {
                    closed_at,
                    item_name: i.name.clone(),
                    quantity: i.quantity,
                    unit_price: i.unit_price,
                    item_total: to_f64(line_total(i.unit_price, i.quantity)),
                })
        })
        .collect()
}

/// Revenue per menu category, highest first.
///
/// Items are matched to the menu by case-insensitive name; unmatched items
/// fall under [`UNKNOWN_CATEGORY`].
pub fn sales_by_category(items: &[SoldItem], menu: &[MenuItem]) -> Vec<CategorySales> {
    let categories: HashMap<String, &str> = menu
        .iter()
        .map(|m| (m.name.to_lowercase(), m.category.as_str()))
        .collect();

    let mut totals: HashMap<String, Decimal> = HashMap::new();
    for item in items {
        let category = categories
            .get(&item.item_name.to_lowercase())
            .copied()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(UNKNOWN_CATEGORY);
        *totals.entry(normalize_category(category)).or_default() += to_decimal(item.item_total);
    }

    let grand_total: Decimal = totals.values().sum();
    let mut rows: Vec<(String, Decimal)> = totals.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    rows.into_iter()
        .map(|(category, total)| {
            let percentage = if grand_total.is_zero() {
                Decimal::ZERO
            } else {
                total / grand_total * Decimal::ONE_HUNDRED
            };
            CategorySales {
                category,
                total: to_f64(total),
                percentage: to_f64(percentage),
            }
        })
        .collect()
}

/// Ten best sellers by quantity; ties ordered by name
pub fn top_items(items: &[SoldItem]) -> Vec<TopItem> {
    struct Acc {
        quantity: u64,
        revenue: Decimal,
        unit_price: f64,
    }

    let mut by_name: HashMap<&str, Acc> = HashMap::new();
    for item in items {
        let acc = by_name.entry(item.item_name.as_str()).or_insert(Acc {
            quantity: 0,
            revenue: Decimal::ZERO,
            unit_price: item.unit_price,
        });
        acc.quantity += u64::from(item.quantity);
        acc.revenue += to_decimal(item.item_total);
        acc.unit_price = item.unit_price;
    }

    let mut rows: Vec<TopItem> = by_name
        .into_iter()
        .map(|(name, acc)| TopItem {
            item_name: name.to_string(),
            quantity: acc.quantity,
            revenue: to_f64(acc.revenue),
            unit_price: acc.unit_price,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.quantity
            .cmp(&a.quantity)
            .then_with(|| a.item_name.cmp(&b.item_name))
    });
    rows.truncate(TOP_ITEMS_LIMIT);
    rows
}

/// Items sold per local hour; only hours with sales, in clock order
pub fn hourly_movement(items: &[SoldItem], offset: &FixedOffset) -> Vec<HourlyMovement> {
    let mut buckets: BTreeMap<u32, u64> = BTreeMap::new();
    for item in items {
        let hour = item.closed_at.with_timezone(offset).hour();
        *buckets.entry(hour).or_default() += u64::from(item.quantity);
    }
    buckets
        .into_iter()
        .map(|(hour, items_sold)| HourlyMovement {
            hour: format!("{hour:02}:00"),
            items_sold,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::LineItem;
    use crate::util::offset_from_minutes;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn line(id: u64, name: &str, price: f64, qty: u32, status: ItemStatus) -> LineItem {
        LineItem {
            id,
            name: name.to_string(),
            unit_price: price,
            quantity: qty,
            item_status: status,
        }
    }

    fn closed_order(id: u64, closed_at: &str, items: Vec<LineItem>) -> Order {
        Order {
            id,
            created_at: at(closed_at),
            scheduling_code: "00".to_string(),
            status: OrderStatus::Closed,
            total: crate::order::lifecycle::compute_total(&items),
            items,
            note: String::new(),
            closed_at: Some(at(closed_at)),
            payment_method: Some("Pix".to_string()),
        }
    }

    fn sold(name: &str, qty: u32, price: f64, closed_at: &str) -> SoldItem {
        SoldItem {
            closed_at: at(closed_at),
            item_name: name.to_string(),
            quantity: qty,
            unit_price: price,
            item_total: price * qty as f64,
        }
    }

    fn menu_item(name: &str, category: &str) -> MenuItem {
        MenuItem {
            id: 1,
            name: name.to_string(),
            price: 1.0,
            category: category.to_string(),
        }
    }

    #[test]
    fn test_sold_items_skip_cancelled_and_open_orders() {
        let mut open = closed_order(
            2,
            "2025-03-10T12:00:00Z",
            vec![line(1, "Soda", 5.0, 1, ItemStatus::Preparing)],
        );
        open.status = OrderStatus::Preparing;
        open.closed_at = None;

        let orders = vec![
            closed_order(
                1,
                "2025-03-10T12:00:00Z",
                vec![
                    line(1, "Soda", 5.0, 3, ItemStatus::Delivered),
                    line(2, "Burger", 8.0, 2, ItemStatus::Cancelled),
                ],
            ),
            open,
        ];

        let items = sold_items(&orders, &DateRange::unbounded());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].item_name, "Soda");
        assert_eq!(items[0].item_total, 15.0);

        let cash = movements(&orders, &DateRange::unbounded());
        assert_eq!(cash.len(), 1);
        // total still counts the cancelled line
        assert_eq!(cash[0].total, 31.0);
    }

    #[test]
    fn test_sold_items_respect_range() {
        let orders = vec![
            closed_order(1, "2025-03-09T12:00:00Z", vec![line(1, "A", 1.0, 1, ItemStatus::Delivered)]),
            closed_order(2, "2025-03-10T12:00:00Z", vec![line(1, "B", 1.0, 1, ItemStatus::Delivered)]),
        ];
        let range = DateRange {
            start: Some(at("2025-03-10T00:00:00Z")),
            end: None,
        };
        let items = sold_items(&orders, &range);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].item_name, "B");
    }

    #[test]
    fn test_sales_by_category_fallback_and_order() {
        let menu = vec![menu_item("soda", "bebidas"), menu_item("Burger", "Pratos principais")];
        let items = vec![
            sold("Soda", 2, 5.0, "2025-03-10T12:00:00Z"),
            sold("BURGER", 1, 30.0, "2025-03-10T12:00:00Z"),
            sold("Mystery", 1, 10.0, "2025-03-10T12:00:00Z"),
        ];
        let rows = sales_by_category(&items, &menu);
        let names: Vec<&str> = rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(names, vec!["Pratos principais", "Bebidas", "Outros"]);
        assert_eq!(rows[0].total, 30.0);
        assert_eq!(rows[0].percentage, 60.0);
        assert_eq!(rows[2].percentage, 20.0);
    }

    #[test]
    fn test_top_items_limit_and_order() {
        let mut items: Vec<SoldItem> = (0..12)
            .map(|i| sold(&format!("item-{i:02}"), 1, 2.0, "2025-03-10T12:00:00Z"))
            .collect();
        items.push(sold("item-05", 4, 2.5, "2025-03-10T13:00:00Z"));

        let top = top_items(&items);
        assert_eq!(top.len(), TOP_ITEMS_LIMIT);
        assert_eq!(top[0].item_name, "item-05");
        assert_eq!(top[0].quantity, 5);
        assert_eq!(top[0].revenue, 12.0);
        assert_eq!(top[0].unit_price, 2.5);
        assert_eq!(top[1].item_name, "item-00");
    }

    #[test]
    fn test_hourly_movement_uses_local_hour() {
        let brt = offset_from_minutes(-180);
        let items = vec![
            sold("A", 2, 1.0, "2025-03-10T15:10:00Z"),
            sold("B", 1, 1.0, "2025-03-10T15:50:00Z"),
            sold("C", 4, 1.0, "2025-03-10T02:00:00Z"),
        ];
        let rows = hourly_movement(&items, &brt);
        assert_eq!(
            rows,
            vec![
                HourlyMovement {
                    hour: "12:00".to_string(),
                    items_sold: 3
                },
                HourlyMovement {
                    hour: "23:00".to_string(),
                    items_sold: 4
                },
            ]
        );
    }
}
