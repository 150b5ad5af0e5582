//! Storage
//!
//! Local key-value storage the stores mirror their state into, plus the versioned snapshot
//! format layered on top of it.

use std::{io, rc::Rc};

use thiserror::Error;

pub mod file;
pub mod memory;
pub mod persisted;
pub mod snapshot;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use persisted::Persisted;
pub use snapshot::{SnapshotError, Versioned};

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error reading or writing the backing files.
    #[error("storage io error: {0}")]
    Io(#[from] io::Error),

    /// The key cannot be mapped onto the backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Writing the value would exceed the backend's size limit.
    #[error("storage quota of {limit} bytes exceeded writing {key:?}")]
    QuotaExceeded {
        /// Key being written
        key: String,

        /// Quota in bytes
        limit: usize,
    },
}

/// A string key-value store with local-storage semantics.
///
/// All methods take `&self`; backends use interior mutability so one storage can be shared by
/// several stores on the same thread.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStorage {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Rc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
