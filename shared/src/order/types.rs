//! Order ticket ("comanda") types and request payloads

use super::status::{ItemStatus, OrderStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Scheduling code used when the request omits one
pub const DEFAULT_SCHEDULING_CODE: &str = "00";

// ============================================================================
// Persisted types
// ============================================================================

/// Order ticket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    /// `DDMMYYYYHHmm`, display only
    #[serde(default = "default_scheduling_code")]
    pub scheduling_code: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Σ quantity × unit_price over every item, cancelled included
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

fn default_scheduling_code() -> String {
    DEFAULT_SCHEDULING_CODE.to_string()
}

impl Order {
    pub fn is_closed(&self) -> bool {
        self.status.is_closed()
    }

    pub fn find_item_mut(&mut self, item_id: u64) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|i| i.id == item_id)
    }

    /// Next line item id: per-order monotonic counter
    pub fn next_item_id(&self) -> u64 {
        crate::util::next_id(self.items.iter().map(|i| i.id))
    }

    /// Any item still owed to the table
    pub fn has_pending_items(&self) -> bool {
        self.items.iter().any(|i| i.item_status.is_pending())
    }
}

/// Line item inside an order
///
/// Name and price are copied at insertion time; there is no link back to
/// the menu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: u64,
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub item_status: ItemStatus,
}

// ============================================================================
// Request payloads
// ============================================================================

/// Raw item as sent by the clients
///
/// Price and quantity stay untyped until validation so that numeric strings
/// (`"12,50"`) are accepted and bad values surface as 400 validation errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemInput {
    #[serde(default, alias = "nome")]
    pub name: Option<String>,
    #[serde(
        default,
        alias = "price",
        alias = "preco",
        alias = "precoUnitario"
    )]
    pub unit_price: Option<Value>,
    #[serde(default, alias = "quantidade")]
    pub quantity: Option<Value>,
}

/// Validated item ready to be appended to an order
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
}

impl NewItem {
    /// Stamp the item with its id and initial kitchen status
    pub fn into_line_item(self, id: u64) -> LineItem {
        LineItem {
            id,
            name: self.name,
            unit_price: self.unit_price,
            quantity: self.quantity,
            item_status: ItemStatus::Preparing,
        }
    }
}

/// POST /api/comandas
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default, alias = "table", alias = "mesa")]
    pub scheduling_code: Option<String>,
    #[serde(default, alias = "itens", deserialize_with = "null_as_empty")]
    pub items: Vec<ItemInput>,
    #[serde(default, alias = "observacao")]
    pub note: Option<String>,
}

/// PUT /api/comandas/:id/adicionar-itens
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemsRequest {
    #[serde(default, alias = "itens", deserialize_with = "null_as_empty")]
    pub items: Vec<ItemInput>,
    #[serde(default, alias = "observacao")]
    pub note: Option<String>,
    #[serde(default, alias = "table", alias = "mesa")]
    pub scheduling_code: Option<String>,
}

/// `"items": null` reads as an empty list
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ItemInput>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ItemInput>>::deserialize(deserializer)?.unwrap_or_default())
}

/// PUT /api/comandas/fechar/:id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseOrderRequest {
    #[serde(default, alias = "formaPagamento")]
    pub payment_method: Option<String>,
}

/// Response of PUT /api/comandas/:id/pronto-todos
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAllReadyResponse {
    pub message: String,
    pub count: usize,
    pub order: Order,
}
