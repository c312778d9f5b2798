#[cfg(test)]
mod memory;
mod schema;
mod sqlite;
mod unavailable;

#[cfg(test)]
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use unavailable::UnavailableStore;

/// Failures reported by a key-value backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage is unavailable: {0}")]
    Unavailable(String),
    #[error("value for '{key}' is {size} bytes, over the {limit} byte quota")]
    QuotaExceeded {
        key: String,
        size: usize,
        limit: usize,
    },
    #[error("storage backend failed: {0}")]
    Backend(#[from] rusqlite::Error),
}

/// A string-keyed, string-valued store with a single writer.
///
/// Implementations take `&self` so one backend can be shared between the
/// collection stores of a session.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Reject `value` when it does not fit in `limit` bytes. A limit of zero
/// disables the check.
pub fn check_quota(key: &str, value: &str, limit: usize) -> Result<(), StoreError> {
    if limit > 0 && value.len() > limit {
        return Err(StoreError::QuotaExceeded {
            key: key.to_string(),
            size: value.len(),
            limit,
        });
    }
    Ok(())
}
