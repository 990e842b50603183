//! Durable key-value persistence for roster state.

/// Process-local map used in tests and dry runs.
pub mod memory;
/// SQLite-backed key-value table.
pub mod sqlite;

use thiserror::Error;

/// Failure reading or writing durable state.
#[derive(Debug, Error)]
pub enum PersistError {
    /// SQLite reported an error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Stored JSON could not be encoded or decoded.
    #[error("json error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Any other storage failure.
    #[error("{0}")]
    Message(String),
}

/// Result alias for persistence calls.
pub type PersistResult<T> = Result<T, PersistError>;

/// Synchronous string-keyed store; a missing key is `Ok(None)`.
pub trait KvStore: Send {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> PersistResult<Option<String>>;
    /// Overwrites the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> PersistResult<()>;
}

impl<T: KvStore + ?Sized> KvStore for Box<T> {
    fn get(&self, key: &str) -> PersistResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> PersistResult<()> {
        (**self).set(key, value)
    }
}
