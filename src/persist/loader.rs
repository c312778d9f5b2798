use serde_json::Value;

use super::collection::Collection;
use super::detect::{detect, Detected};
use super::error::PersistenceError;
use super::migrate::migrate;
use crate::db::KeyValueStore;

/// Which path a load took to produce its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored under the key.
    Empty,
    /// Stored data was already at the current version.
    Current { version: u64 },
    Migrated { from: u64, to: u64 },
    /// Stored data was written by a newer build and passed through as is.
    FutureVersion { found: u64, supported: u64 },
    /// Stored data could not be used; the built-in default was returned.
    Defaulted(PersistenceError),
}

impl LoadOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::FutureVersion { .. } | Self::Defaulted(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub value: T,
    pub outcome: LoadOutcome,
    /// The stored bytes are older than `value`: they were migrated, or the
    /// validator had to fill something in (a missing id, a bad date). Only
    /// set for data at or below the current version.
    pub needs_write_back: bool,
}

/// Suffix of the key that keeps a copy of bytes the loader could not use.
pub const QUARANTINE_SUFFIX: &str = ".corrupt";

pub fn quarantine_key(key: &str) -> String {
    format!("{key}{QUARANTINE_SUFFIX}")
}

/// Load a collection, migrating and validating whatever is stored.
///
/// This never fails: unreadable, unparsable or unrecognized data yields
/// the collection's built-in default and a warning in the log. What comes
/// back is either that default or a fully migrated, validated value.
pub fn load<C: Collection>(store: &dyn KeyValueStore) -> Loaded<C::Value> {
    let raw = match store.get(C::KEY) {
        Ok(Some(raw)) if !raw.trim().is_empty() => raw,
        Ok(_) => {
            tracing::debug!(
                target: "budgetkeep",
                event = "collection_load_empty",
                collection = C::NAME,
                key = C::KEY,
            );
            return Loaded {
                value: C::default_value(),
                outcome: LoadOutcome::Empty,
                needs_write_back: false,
            };
        }
        Err(err) => {
            return degrade::<C>(PersistenceError::StoreUnavailable(err.to_string()));
        }
    };

    let decoded: Value = match serde_json::from_str(&raw) {
        Ok(decoded) => decoded,
        Err(err) => {
            quarantine::<C>(store, &raw);
            return degrade::<C>(PersistenceError::ParseFailure(err.to_string()));
        }
    };

    let (version, payload) = match detect(
        &decoded,
        C::PAYLOAD_KEY,
        C::PAYLOAD_KIND,
        C::is_legacy,
    ) {
        Detected::Legacy(payload) => (0, payload),
        Detected::Versioned { version, payload } => (version, payload),
        Detected::Unrecognized(reason) => {
            quarantine::<C>(store, &raw);
            return degrade::<C>(PersistenceError::UnrecognizedFormat(reason));
        }
    };

    let target = C::current_version();
    let (payload, outcome) = if version < target {
        tracing::info!(
            target: "budgetkeep",
            event = "collection_migrated",
            collection = C::NAME,
            from = version,
            to = target,
            "Upgrading stored collection",
        );
        (
            migrate(C::migrations(), payload.clone(), version),
            LoadOutcome::Migrated {
                from: version,
                to: target,
            },
        )
    } else if version == target {
        (payload.clone(), LoadOutcome::Current { version })
    } else {
        let err = PersistenceError::FutureVersion {
            found: version,
            supported: target,
        };
        tracing::warn!(
            target: "budgetkeep",
            event = "collection_future_version",
            collection = C::NAME,
            error = %err,
            "Loading stored collection unmigrated",
        );
        (
            payload.clone(),
            LoadOutcome::FutureVersion {
                found: version,
                supported: target,
            },
        )
    };

    let value = C::validate(&payload);
    let needs_write_back = match outcome {
        LoadOutcome::Migrated { .. } => true,
        LoadOutcome::Current { .. } => !matches!(C::to_payload(&value), Ok(p) if p == payload),
        _ => false,
    };

    Loaded {
        value,
        outcome,
        needs_write_back,
    }
}

fn degrade<C: Collection>(err: PersistenceError) -> Loaded<C::Value> {
    tracing::warn!(
        target: "budgetkeep",
        event = "collection_load_degraded",
        collection = C::NAME,
        key = C::KEY,
        error = %err,
        "Falling back to the default collection",
    );
    Loaded {
        value: C::default_value(),
        outcome: LoadOutcome::Defaulted(err),
        needs_write_back: false,
    }
}

/// Keep the unusable bytes under a side key; the next persist overwrites
/// the main key.
fn quarantine<C: Collection>(store: &dyn KeyValueStore, raw: &str) {
    let key = quarantine_key(C::KEY);
    if let Err(err) = store.set(&key, raw) {
        tracing::warn!(
            target: "budgetkeep",
            event = "collection_quarantine_failed",
            collection = C::NAME,
            key = %key,
            error = %err,
            "Could not keep a copy of unreadable data",
        );
    }
}
