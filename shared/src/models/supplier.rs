//! Supplier (fornecedor) models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Supplier record
///
/// Only `id` and `name` are typed; everything else the back office sends
/// (contact, phone, email, address...) is kept verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Create/update payload (shallow merge over the stored record)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierInput {
    #[serde(default, alias = "nome")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Supplier {
    pub fn from_input(id: u64, input: SupplierInput) -> Self {
        let mut supplier = Self {
            id,
            name: None,
            extra: Map::new(),
        };
        supplier.merge(input);
        supplier
    }

    /// Overlay the payload fields; `id` is never replaced
    pub fn merge(&mut self, input: SupplierInput) {
        if input.name.is_some() {
            self.name = input.name;
        }
        self.extra
            .extend(input.extra.into_iter().filter(|(k, _)| k != "id"));
    }

    /// Name for reports: `ID <id>` when unnamed
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("ID {}", self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_keeps_id_and_unknown_fields() {
        let input: SupplierInput =
            serde_json::from_value(json!({"nome": "Hortifruti", "phone": "123"})).unwrap();
        let mut supplier = Supplier::from_input(4, input);

        let patch: SupplierInput =
            serde_json::from_value(json!({"id": 99, "email": "a@b.c"})).unwrap();
        supplier.merge(patch);

        let value = serde_json::to_value(&supplier).unwrap();
        assert_eq!(
            value,
            json!({"id": 4, "name": "Hortifruti", "phone": "123", "email": "a@b.c"})
        );
    }

    #[test]
    fn test_display_name_fallback() {
        let supplier = Supplier::from_input(9, SupplierInput::default());
        assert_eq!(supplier.display_name(), "ID 9");
    }
}
