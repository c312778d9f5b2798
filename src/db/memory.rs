use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::{check_quota, KeyValueStore, StoreError};

/// Process-local backend. Nothing survives the session.
///
/// Reads and writes can be made to fail on demand, which is how the
/// degraded paths of the loader and persister are exercised.
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    max_value_bytes: usize,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(max_value_bytes: usize) -> Self {
        Self {
            max_value_bytes,
            ..Self::default()
        }
    }

    /// Seed `key` directly, bypassing the quota.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads.get() {
            return Err(StoreError::Unavailable(format!("read of '{key}' refused")));
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes.get() {
            return Err(StoreError::Unavailable(format!("write of '{key}' refused")));
        }
        check_quota(key, value, self.max_value_bytes)?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        if self.fail_writes.get() {
            return Err(StoreError::Unavailable(format!("remove of '{key}' refused")));
        }
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
