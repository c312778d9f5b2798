use serde_json::Value;

use super::collection::PayloadKind;

/// How a decoded blob was classified.
#[derive(Debug, Clone, PartialEq)]
pub enum Detected<'a> {
    /// Unversioned data from before envelopes; implicitly version 0.
    Legacy(&'a Value),
    Versioned { version: u64, payload: &'a Value },
    Unrecognized(String),
}

/// Classify `value` without touching it.
///
/// An envelope needs a non-negative integer `version` and a `payload_key`
/// field of the expected kind. Anything that is neither legacy nor a
/// well-formed envelope is unrecognized.
pub fn detect<'a>(
    value: &'a Value,
    payload_key: &str,
    kind: PayloadKind,
    is_legacy: fn(&Value) -> bool,
) -> Detected<'a> {
    if is_legacy(value) {
        return Detected::Legacy(value);
    }

    let Some(object) = value.as_object() else {
        return Detected::Unrecognized(format!(
            "expected an envelope object, found {}",
            describe(value)
        ));
    };

    let version = match object.get("version") {
        Some(v) => match v.as_u64() {
            Some(version) => version,
            None => {
                return Detected::Unrecognized(format!(
                    "'version' must be a non-negative integer, found {}",
                    describe(v)
                ))
            }
        },
        None => return Detected::Unrecognized("envelope has no 'version' field".into()),
    };

    match object.get(payload_key) {
        Some(payload) if kind.matches(payload) => Detected::Versioned { version, payload },
        Some(payload) => Detected::Unrecognized(format!(
            "'{payload_key}' must be an {}, found {}",
            kind.as_str(),
            describe(payload)
        )),
        None => Detected::Unrecognized(format!("envelope has no '{payload_key}' field")),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_u64() || n.is_i64() => "an integer",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
