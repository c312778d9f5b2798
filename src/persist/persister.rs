use serde_json::{Map, Value};

use super::collection::Collection;
use super::error::PersistenceError;
use crate::db::KeyValueStore;

/// Serialize `value` as the current envelope: `{"version": T, <payload key>: ...}`.
pub fn encode<C: Collection>(value: &C::Value) -> serde_json::Result<String> {
    let mut envelope = Map::new();
    envelope.insert("version".into(), Value::from(C::current_version()));
    envelope.insert(C::PAYLOAD_KEY.into(), C::to_payload(value)?);
    serde_json::to_string(&Value::Object(envelope))
}

/// Write the whole collection under its key, always in the current shape.
///
/// Errors are returned for the caller to log; nothing here retries.
pub fn persist<C: Collection>(
    store: &dyn KeyValueStore,
    value: &C::Value,
) -> Result<(), PersistenceError> {
    let text = encode::<C>(value).map_err(|err| PersistenceError::WriteFailure {
        key: C::KEY.to_string(),
        reason: format!("serialization failed: {err}"),
    })?;
    store
        .set(C::KEY, &text)
        .map_err(|err| PersistenceError::from_write(C::KEY, err))?;
    tracing::debug!(
        target: "budgetkeep",
        event = "collection_persisted",
        collection = C::NAME,
        bytes = text.len(),
    );
    Ok(())
}
