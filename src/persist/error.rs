use crate::db::StoreError;

/// Everything that can go wrong between a collection and its stored bytes.
///
/// None of these ever reach a collaborator: the loader degrades to the
/// built-in default and the collection store logs and records failed writes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    #[error("storage is unavailable: {0}")]
    StoreUnavailable(String),
    #[error("stored value is not valid JSON: {0}")]
    ParseFailure(String),
    #[error("unrecognized stored format: {0}")]
    UnrecognizedFormat(String),
    #[error("stored version {found} is newer than supported version {supported}")]
    FutureVersion { found: u64, supported: u64 },
    #[error("could not write '{key}': {reason}")]
    WriteFailure { key: String, reason: String },
}

impl PersistenceError {
    pub fn from_write(key: &str, err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(reason) => Self::StoreUnavailable(reason),
            other => Self::WriteFailure {
                key: key.to_string(),
                reason: other.to_string(),
            },
        }
    }
}
