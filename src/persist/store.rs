use std::rc::Rc;

use super::collection::Collection;
use super::error::PersistenceError;
use super::loader::{load, LoadOutcome};
use super::persister::persist;
use crate::db::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

type Subscriber<T> = Box<dyn FnMut(&T)>;

/// In-memory home of one collection for the length of a session.
///
/// Seeded once from the loader. Every mutation replaces the whole value,
/// writes it back and then notifies subscribers. The in-memory value is
/// authoritative: a failed write is logged and remembered, never rolled
/// back and never handed to the caller.
pub struct CollectionStore<C: Collection> {
    backend: Rc<dyn KeyValueStore>,
    value: C::Value,
    outcome: LoadOutcome,
    subscribers: Vec<(SubscriptionId, Subscriber<C::Value>)>,
    next_subscription: usize,
    last_persist_error: Option<PersistenceError>,
}

impl<C: Collection> CollectionStore<C> {
    /// Load the collection. When the loader upgraded or repaired the stored
    /// data, the result is written back right away so identifiers minted
    /// during the load are the ones the next run sees.
    pub fn open(backend: Rc<dyn KeyValueStore>) -> Self {
        let loaded = load::<C>(backend.as_ref());
        let mut store = Self {
            backend,
            value: loaded.value,
            outcome: loaded.outcome,
            subscribers: Vec::new(),
            next_subscription: 0,
            last_persist_error: None,
        };
        if loaded.needs_write_back {
            store.save();
        }
        store
    }

    pub fn get(&self) -> &C::Value {
        &self.value
    }

    /// How the initial value was obtained.
    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.outcome
    }

    pub fn last_persist_error(&self) -> Option<&PersistenceError> {
        self.last_persist_error.as_ref()
    }

    /// Replace the value, persist it and notify subscribers.
    pub fn set(&mut self, value: C::Value) {
        self.value = C::normalize(value);
        self.save();

        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&self.value);
        }
    }

    fn save(&mut self) {
        match persist::<C>(self.backend.as_ref(), &self.value) {
            Ok(()) => self.last_persist_error = None,
            Err(err) => {
                tracing::error!(
                    target: "budgetkeep",
                    event = "collection_persist_failed",
                    collection = C::NAME,
                    key = C::KEY,
                    error = %err,
                    "Changes are kept in memory but were not saved",
                );
                self.last_persist_error = Some(err);
            }
        }
    }

    pub fn update(&mut self, f: impl FnOnce(&mut C::Value)) {
        let mut value = self.value.clone();
        f(&mut value);
        self.set(value);
    }

    /// Register an observer called with the new value after every mutation.
    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&C::Value) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
