//! Persisted State
//!
//! Owns a piece of state together with the storage key it is mirrored to. The state is
//! rehydrated once on construction and written back after every [`Persisted::update`].

use tracing::{debug, warn};

use crate::storage::{KeyValueStorage, snapshot};

/// State mirrored to a named storage key.
#[derive(Debug)]
pub struct Persisted<S, T> {
    storage: S,
    key: String,
    state: T,
}

impl<S, T> Persisted<S, T>
where
    S: KeyValueStorage,
    T: snapshot::Versioned + Default,
{
    /// Rehydrate state from `key`, falling back to `T::default()` when nothing usable is stored.
    ///
    /// Read and decode failures are logged and otherwise ignored.
    pub fn load(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();

        let state = match snapshot::read::<T, _>(&storage, &key) {
            Ok(Some(state)) => {
                debug!(key = %key, "rehydrated persisted state");
                state
            }
            Ok(None) => T::default(),
            Err(error) => {
                warn!(key = %key, %error, "discarding unreadable persisted state");
                T::default()
            }
        };

        Self {
            storage,
            key,
            state,
        }
    }

    /// Current state.
    pub fn state(&self) -> &T {
        &self.state
    }

    /// Storage key the state is mirrored to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Apply `f` to the state and write the result back to storage.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.state);
        self.flush();

        result
    }

    /// Write the current state to storage. Returns false if the write failed.
    ///
    /// Failures are logged, never raised: persisted state is a convenience copy.
    pub fn flush(&self) -> bool {
        match snapshot::write(&self.storage, &self.key, &self.state) {
            Ok(()) => true,
            Err(error) => {
                warn!(key = %self.key, %error, "failed to persist state");
                false
            }
        }
    }
}
