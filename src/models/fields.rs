//! Field-level coercions shared by the record validators.
//!
//! Every helper here is total: it never fails and always hands back a value
//! that satisfies the record contract.

use serde_json::Value;

/// Today's local date in `YYYY-MM-DD` form.
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// True when `s` has the exact `YYYY-MM-DD` shape (ASCII digits, dashes at
/// positions 4 and 7). Calendar validity is not checked.
pub fn is_iso_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

pub fn date_or_today(value: Option<&Value>) -> String {
    match value.and_then(Value::as_str) {
        Some(s) if is_iso_date(s) => s.to_string(),
        _ => today(),
    }
}

/// Non-negative finite magnitude, or `default` when the value is not a number.
pub fn magnitude_or(value: Option<&Value>, default: f64) -> f64 {
    match value.and_then(Value::as_f64) {
        Some(n) if n.is_finite() => n.abs(),
        _ => default,
    }
}

pub fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}
