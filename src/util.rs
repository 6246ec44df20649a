// Lenient parsing helpers for the JSON the backend hands us.
//
// Everything here returns `Option` so callers decide whether a missing value
// means "zero", "no constraint" or "skip".
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Parse a numeric string such as `" 1500.5 "`.
///
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Read a JSON value as a number. Numeric strings are accepted because some
/// endpoints serialize decimals as text.
pub fn json_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_f64_safe(Some(s)),
        _ => None,
    }
}

/// Treat NaN as zero, the way `value || 0` does in the dashboard.
pub fn or_zero(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v
    }
}

/// Parse a user-facing `DD/MM/YYYY` date.
pub fn parse_br_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%d/%m/%Y").ok()
}

/// Parse a record timestamp as sent by the API.
///
/// Accepts RFC 3339 (`2025-03-05T10:00:00Z`), a naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` and a bare `YYYY-MM-DD` (midnight). Offset
/// timestamps keep their own wall-clock time, so the calendar day matches
/// what the user saw when the record was entered.
pub fn parse_record_datetime(s: Option<&str>) -> Option<NaiveDateTime> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
