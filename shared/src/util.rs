use chrono::{DateTime, FixedOffset, NaiveDate, Offset, TimeZone, Utc};
use serde_json::Value;

/// Next integer id for a collection: `max(existing) + 1`, or 1 when empty.
pub fn next_id(existing: impl IntoIterator<Item = u64>) -> u64 {
    existing.into_iter().max().map_or(1, |max| max + 1)
}

/// Build a fixed offset from minutes east of UTC, falling back to UTC when out of range.
pub fn offset_from_minutes(minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(minutes.saturating_mul(60)).unwrap_or_else(|| Utc.fix())
}

/// Parse a date that is either `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// Bare dates are interpreted as local midnight in `offset`.
pub fn parse_flexible_date(value: &str, offset: &FixedOffset) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    offset
        .from_local_datetime(&midnight)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Read a number that may arrive as JSON number or as a numeric string.
///
/// Strings accept either `,` or `.` as decimal separator (`"12,50"`).
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_decimal_str(s),
        _ => None,
    }
}

/// Parse `"12,50"` or `"12.50"`
pub fn parse_decimal_str(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.replace(',', ".").parse::<f64>().ok()
}

/// Render a `DDMMYYYYHHmm` scheduling code as `DD/MM/YYYY HH:mm`.
///
/// Returns `None` when the code is not exactly 12 ASCII digits.
pub fn format_scheduling_code(code: &str) -> Option<String> {
    if code.len() != 12 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!(
        "{}/{}/{} {}:{}",
        &code[0..2],
        &code[2..4],
        &code[4..8],
        &code[8..10],
        &code[10..12]
    ))
}
