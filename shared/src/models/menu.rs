//! Menu (cardápio) models

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Category used when the CSV row has none
pub const DEFAULT_CATEGORY: &str = "Geral";

/// Intake sections in display order (lowercase)
pub const ALLOWED_SECTIONS: [&str; 7] = [
    "entradas",
    "pratos principais",
    "porções",
    "adicionais",
    "sobremesas",
    "drinks",
    "bebidas",
];

/// Section for categories outside [`ALLOWED_SECTIONS`]
pub const FALLBACK_SECTION: &str = "geral";

/// Menu item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub category: String,
}

/// Create/update payload
///
/// `id` and `price` stay untyped: the back-office form posts them as strings
/// (`"12,50"`, `""` for a new item).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemInput {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, alias = "nome")]
    pub name: Option<String>,
    #[serde(default, alias = "preco")]
    pub price: Option<Value>,
    #[serde(default, alias = "categoria")]
    pub category: Option<String>,
}

impl MenuItemInput {
    /// Existing item id carried by the payload, if any.
    ///
    /// Empty strings and non-positive values count as "no id".
    pub fn existing_id(&self) -> Option<u64> {
        let id = crate::util::parse_number(self.id.as_ref()?)?;
        (id >= 1.0 && id.fract() == 0.0).then_some(id as u64)
    }
}

/// Menu items of one intake section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuSection {
    /// Display name (`Pratos principais`)
    pub section: String,
    pub items: Vec<MenuItem>,
}

/// "first letter upper, rest lower": `PRATOS principais` → `Pratos principais`
pub fn normalize_category(raw: &str) -> String {
    let mut chars = raw.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Intake section (lowercase) for a category
pub fn section_for(category: &str) -> &'static str {
    let lower = category.trim().to_lowercase();
    ALLOWED_SECTIONS
        .iter()
        .find(|s| **s == lower)
        .copied()
        .unwrap_or(FALLBACK_SECTION)
}

/// Group the menu by intake section.
///
/// Sections follow [`ALLOWED_SECTIONS`] order with the fallback last; empty
/// sections are omitted. Items keep their menu order inside a section.
pub fn group_by_section(items: &[MenuItem]) -> Vec<MenuSection> {
    ALLOWED_SECTIONS
        .iter()
        .chain(std::iter::once(&FALLBACK_SECTION))
        .filter_map(|section| {
            let members: Vec<MenuItem> = items
                .iter()
                .filter(|i| section_for(&i.category) == *section)
                .cloned()
                .collect();
            (!members.is_empty()).then(|| MenuSection {
                section: normalize_category(section),
                items: members,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(id: u64, category: &str) -> MenuItem {
        MenuItem {
            id,
            name: format!("item-{id}"),
            price: 10.0,
            category: category.to_string(),
        }
    }

    #[test]
    fn test_normalize_category() {
        assert_eq!(normalize_category("  bebidas "), "Bebidas");
        assert_eq!(normalize_category("PRATOS PRINCIPAIS"), "Pratos principais");
        assert_eq!(normalize_category("óleos"), "Óleos");
        assert_eq!(normalize_category(""), "");
    }

    #[test]
    fn test_section_for() {
        assert_eq!(section_for("Porções"), "porções");
        assert_eq!(section_for("Drinks"), "drinks");
        assert_eq!(section_for("Lanches"), FALLBACK_SECTION);
        assert_eq!(section_for(DEFAULT_CATEGORY), FALLBACK_SECTION);
    }

    #[test]
    fn test_group_by_section_order() {
        let menu = vec![
            item(1, "Bebidas"),
            item(2, "Lanches"),
            item(3, "Entradas"),
            item(4, "Bebidas"),
        ];
        let sections = group_by_section(&menu);
        let names: Vec<&str> = sections.iter().map(|s| s.section.as_str()).collect();
        assert_eq!(names, vec!["Entradas", "Bebidas", "Geral"]);
        assert_eq!(sections[1].items.len(), 2);
        assert_eq!(sections[2].items[0].id, 2);
    }

    #[test]
    fn test_existing_id() {
        let mut input = MenuItemInput::default();
        assert_eq!(input.existing_id(), None);
        input.id = Some(json!(""));
        assert_eq!(input.existing_id(), None);
        input.id = Some(json!("7"));
        assert_eq!(input.existing_id(), Some(7));
        input.id = Some(json!(3));
        assert_eq!(input.existing_id(), Some(3));
        input.id = Some(json!(0));
        assert_eq!(input.existing_id(), None);
    }
}
