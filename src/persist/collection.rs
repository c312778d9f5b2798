use serde_json::Value;

use super::migrate::MigrationStep;

/// JSON shape the payload of a versioned envelope must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Array,
    Object,
}

impl PayloadKind {
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

/// Everything the engine needs to know about one persisted collection.
///
/// The loader, persister and collection store are written once against this
/// trait; a collection only supplies its identity, its default, its record
/// validator and its ordered migration steps.
pub trait Collection {
    type Value: Clone + std::fmt::Debug + PartialEq + 'static;

    /// Name used in log lines.
    const NAME: &'static str;
    /// Key the envelope is stored under.
    const KEY: &'static str;
    /// Field of the envelope holding the payload.
    const PAYLOAD_KEY: &'static str;
    const PAYLOAD_KIND: PayloadKind;

    /// Steps in order; step `n` upgrades a payload from version `n` to `n + 1`.
    fn migrations() -> &'static [MigrationStep];

    /// Whether `raw` is the unversioned shape written before envelopes existed.
    fn is_legacy(raw: &Value) -> bool {
        raw.is_array()
    }

    fn default_value() -> Self::Value;

    /// Total and defaulting: every payload maps to a well-formed value.
    fn validate(payload: &Value) -> Self::Value;

    fn to_payload(value: &Self::Value) -> serde_json::Result<Value>;

    /// The version this build writes, equal to the number of steps.
    fn current_version() -> u64 {
        Self::migrations().len() as u64
    }

    /// Push a value through the record contract again.
    fn normalize(value: Self::Value) -> Self::Value {
        match Self::to_payload(&value) {
            Ok(payload) => Self::validate(&payload),
            Err(_) => value,
        }
    }
}
