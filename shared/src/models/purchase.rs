//! Purchase (compra) models

use crate::error::{AppError, AppResult};
use crate::util::parse_number;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Purchase from a supplier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: u64,
    /// Dangling ids are allowed: deleting a supplier does not cascade
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<u64>,
    /// `YYYY-MM-DD` or RFC 3339
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Create/update payload
///
/// Numbers may arrive as strings from form inputs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseInput {
    /// `None` when absent; `Some(Value::Null)` for an explicit `null`
    #[serde(default, alias = "fornecedorId", deserialize_with = "present")]
    pub supplier_id: Option<Value>,
    #[serde(default, alias = "data")]
    pub date: Option<String>,
    #[serde(default, alias = "descricao")]
    pub description: Option<String>,
    #[serde(default)]
    pub total: Option<Value>,
    #[serde(default, alias = "observacoes")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Purchase {
    pub fn from_input(id: u64, input: PurchaseInput) -> AppResult<Self> {
        let mut purchase = Self {
            id,
            supplier_id: None,
            date: None,
            description: None,
            total: 0.0,
            notes: None,
            extra: Map::new(),
        };
        purchase.merge(input)?;
        Ok(purchase)
    }

    /// Shallow merge of the payload; `id` is never replaced.
    ///
    /// An explicit `null` or blank `supplierId` unlinks the supplier.
    ///
    /// Fails without touching `self` when a numeric field cannot be read.
    pub fn merge(&mut self, input: PurchaseInput) -> AppResult<()> {
        let supplier_id = match input.supplier_id {
            None => self.supplier_id,
            Some(Value::Null) => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(v) => Some(parse_id(&v).ok_or_else(|| {
                AppError::validation(format!("supplierId must be a positive integer, got {v}"))
                    .with_detail("field", "supplierId")
            })?),
        };
        let total = match input.total {
            None | Some(Value::Null) => None,
            Some(v) => {
                let total = parse_number(&v).ok_or_else(|| {
                    AppError::validation(format!("total must be a number, got {v}"))
                        .with_detail("field", "total")
                })?;
                Some(crate::money::validate_price(total, "total")?)
            }
        };

        self.supplier_id = supplier_id;
        if let Some(total) = total {
            self.total = total;
        }
        if input.date.is_some() {
            self.date = input.date;
        }
        if input.description.is_some() {
            self.description = input.description;
        }
        if input.notes.is_some() {
            self.notes = input.notes;
        }
        self.extra
            .extend(input.extra.into_iter().filter(|(k, _)| k != "id"));
        Ok(())
    }
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn parse_id(value: &Value) -> Option<u64> {
    let n = parse_number(value)?;
    (n >= 1.0 && n.fract() == 0.0).then_some(n as u64)
}
