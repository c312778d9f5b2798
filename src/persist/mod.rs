//! Versioned persistence for the user's collections.
//!
//! Stored blobs are either legacy (the bare payload, implicitly version 0)
//! or an envelope `{"version": V, <payload key>: ...}`. Loading detects the
//! shape, runs the collection's migration steps `V..T` in order, validates
//! every record and degrades to the built-in default on any failure.
//! Writing always produces the version `T` envelope.

mod collection;
mod collections;
mod detect;
mod error;
mod loader;
mod migrate;
mod persister;
mod store;

pub use collection::{Collection, PayloadKind};
pub use collections::{Budget, Categories, Transactions};
pub use detect::{detect, Detected};
pub use error::PersistenceError;
pub use loader::{load, quarantine_key, LoadOutcome, Loaded, QUARANTINE_SUFFIX};
pub use migrate::{migrate, MigrationStep};
pub use persister::{encode, persist};
pub use store::{CollectionStore, SubscriptionId};
