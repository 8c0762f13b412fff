//! On-disk formats of the collections

use super::error::{StoreError, StoreResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::MenuItem;
use shared::models::menu::DEFAULT_CATEGORY;
use shared::util::parse_decimal_str;
use std::fmt::Write as _;

/// Encode/decode a whole collection file
pub trait Codec<T>: Send + Sync + 'static {
    fn decode(&self, bytes: &[u8]) -> StoreResult<Vec<T>>;
    fn encode(&self, items: &[T]) -> StoreResult<Vec<u8>>;
}

/// Pretty-printed JSON array. An empty file reads as an empty collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl<T> Codec<T> for JsonCodec
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    fn decode(&self, bytes: &[u8]) -> StoreResult<Vec<T>> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(bytes)?)
    }

    fn encode(&self, items: &[T]) -> StoreResult<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(items)?)
    }
}

/// Menu CSV header
pub const MENU_CSV_HEADER: &str = "id;name;price;category";

/// Semicolon-delimited menu file: `id;name;price;category`
///
/// Prices are written with a comma decimal separator and two places. The
/// reader also accepts the legacy `id;nome;preco;categoria` header, rows
/// without a category and either decimal separator. Rows that cannot be
/// parsed are skipped with a warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct MenuCsvCodec;

impl MenuCsvCodec {
    fn parse_row(line: &str) -> Option<MenuItem> {
        let mut parts = line.split(';');
        let id = parts.next()?.trim().parse::<u64>().ok()?;
        let name = parts.next()?.trim().to_string();
        let price = parse_decimal_str(parts.next()?)?;
        let category = parts
            .next()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string();
        if name.is_empty() || !price.is_finite() {
            return None;
        }
        Some(MenuItem {
            id,
            name,
            price,
            category,
        })
    }

    fn is_header(line: &str) -> bool {
        line.split(';')
            .next()
            .is_some_and(|first| first.trim().eq_ignore_ascii_case("id"))
    }
}

impl Codec<MenuItem> for MenuCsvCodec {
    fn decode(&self, bytes: &[u8]) -> StoreResult<Vec<MenuItem>> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| StoreError::Csv(format!("menu file is not valid UTF-8: {e}")))?;
        // Tolerate a UTF-8 BOM written by spreadsheet tools
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let mut items = Vec::new();
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || Self::is_header(line) {
                continue;
            }
            match Self::parse_row(line) {
                Some(item) => items.push(item),
                None => tracing::warn!(line = index + 1, row = %line, "Skipping unparsable menu row"),
            }
        }
        Ok(items)
    }

    fn encode(&self, items: &[MenuItem]) -> StoreResult<Vec<u8>> {
        let mut out = String::with_capacity(32 * (items.len() + 1));
        out.push_str(MENU_CSV_HEADER);
        out.push('\n');
        for item in items {
            let price = format!("{:.2}", item.price).replace('.', ",");
            let _ = writeln!(out, "{};{};{};{}", item.id, item.name, price, item.category);
        }
        Ok(out.into_bytes())
    }
}
