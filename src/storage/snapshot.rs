//! Snapshots
//!
//! Persisted state is wrapped in a versioned envelope:
//!
//! ```json
//! { "state": { ... }, "version": 1 }
//! ```
//!
//! Reading runs [`Versioned::migrate`] with the stored version. A document with no envelope at
//! all is treated as version `0`, which is how unversioned snapshots written before the
//! envelope existed are picked up.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;

use crate::storage::{KeyValueStorage, StorageError};

/// Errors reading or writing a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Backend error.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The document is not valid JSON or does not match the state layout.
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// The stored version has no migration path.
    #[error("unsupported snapshot version {found}, current version is {current}")]
    UnsupportedVersion {
        /// Version found in storage
        found: u64,

        /// Version this build writes
        current: u32,
    },
}

/// State with a persisted schema version.
pub trait Versioned: Serialize + DeserializeOwned {
    /// Version written with every snapshot.
    const VERSION: u32;

    /// Build the current state from a stored document of the given version.
    ///
    /// The default accepts only the current version.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] if the version is unsupported or the document does not match
    /// the layout for that version.
    fn migrate(version: u32, state: Value) -> Result<Self, SnapshotError> {
        if version == Self::VERSION {
            Ok(serde_json::from_value(state)?)
        } else {
            Err(SnapshotError::UnsupportedVersion {
                found: u64::from(version),
                current: Self::VERSION,
            })
        }
    }
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    state: &'a T,
    version: u32,
}

#[derive(Deserialize)]
struct StoredEnvelope {
    state: Value,
    #[serde(default)]
    version: u64,
}

/// Serialize state into a versioned envelope.
///
/// # Errors
///
/// Returns a [`SnapshotError`] if the state cannot be serialized.
pub fn encode<T: Versioned>(state: &T) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(&Envelope {
        state,
        version: T::VERSION,
    })?)
}

/// Parse a stored document, migrating it to the current version.
///
/// # Errors
///
/// Returns a [`SnapshotError`] if the document is malformed or its version is unsupported.
pub fn decode<T: Versioned>(raw: &str) -> Result<T, SnapshotError> {
    let document: Value = serde_json::from_str(raw)?;

    let is_envelope = document
        .as_object()
        .is_some_and(|object| object.contains_key("state"));

    let (version, state) = if is_envelope {
        let envelope: StoredEnvelope = serde_json::from_value(document)?;

        (envelope.version, envelope.state)
    } else {
        (0, document)
    };

    let version = u32::try_from(version).map_err(|_overflow| SnapshotError::UnsupportedVersion {
        found: version,
        current: T::VERSION,
    })?;

    T::migrate(version, state)
}

/// Read and decode the snapshot stored under `key`.
///
/// # Errors
///
/// Returns a [`SnapshotError`] if the backend fails or the stored document cannot be decoded.
pub fn read<T, S>(storage: &S, key: &str) -> Result<Option<T>, SnapshotError>
where
    T: Versioned,
    S: KeyValueStorage + ?Sized,
{
    storage
        .get(key)?
        .map(|raw| decode(&raw))
        .transpose()
}

/// Encode `state` and store it under `key`.
///
/// # Errors
///
/// Returns a [`SnapshotError`] if the state cannot be serialized or the backend rejects it.
pub fn write<T, S>(storage: &S, key: &str, state: &T) -> Result<(), SnapshotError>
where
    T: Versioned,
    S: KeyValueStorage + ?Sized,
{
    storage.set(key, &encode(state)?)?;

    Ok(())
}
