use std::rc::Rc;

use crate::db::KeyValueStore;
use crate::persist::{Budget, Categories, CollectionStore, LoadOutcome, Transactions};

/// The collections of one run, all loaded from the same backend.
pub struct Session {
    pub transactions: CollectionStore<Transactions>,
    pub budget: CollectionStore<Budget>,
    pub categories: CollectionStore<Categories>,
}

impl Session {
    /// Load every collection once. Never fails; unusable data comes back as
    /// the collection's default.
    pub fn open(backend: Rc<dyn KeyValueStore>) -> Self {
        Self {
            transactions: CollectionStore::open(backend.clone()),
            budget: CollectionStore::open(backend.clone()),
            categories: CollectionStore::open(backend),
        }
    }

    /// Collections whose stored data was not used as is.
    pub fn degraded(&self) -> Vec<(&'static str, &LoadOutcome)> {
        [
            ("transactions", self.transactions.load_outcome()),
            ("budget", self.budget.load_outcome()),
            ("categories", self.categories.load_outcome()),
        ]
        .into_iter()
        .filter(|(_, outcome)| outcome.is_degraded())
        .collect()
    }

    /// Whether the last write of any collection failed.
    pub fn has_unsaved_changes(&self) -> bool {
        self.transactions.last_persist_error().is_some()
            || self.budget.last_persist_error().is_some()
            || self.categories.last_persist_error().is_some()
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
