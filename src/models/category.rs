use serde_json::Value;

const DEFAULT_CATEGORIES: &[&str] = &["Food", "Transport", "Entertainment"];

pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect()
}

/// Keep the string entries, trimmed, in their stored order. Duplicates are
/// left alone.
pub fn validate_categories(raw: &[Value]) -> Vec<String> {
    raw.iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Find a category by name (case-insensitive) in a slice.
pub fn find_by_name<'a>(categories: &'a [String], name: &str) -> Option<&'a String> {
    let lower = name.to_lowercase();
    categories.iter().find(|c| c.to_lowercase() == lower)
}
