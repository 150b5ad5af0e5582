//! In-memory Storage

use std::cell::RefCell;

use rustc_hash::FxHashMap;

use crate::storage::{KeyValueStorage, StorageError};

/// Storage held in process memory, with an optional byte quota.
///
/// The quota counts key and value bytes across all entries, the same way browser local
/// storage accounts for its limit.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<FxHashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Create an empty, unbounded storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty storage that rejects writes past `limit` bytes.
    pub fn with_quota(limit: usize) -> Self {
        Self {
            entries: RefCell::default(),
            quota: Some(limit),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Check if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(existing, value)| existing.len().saturating_add(value.len()))
            .sum()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(limit) = self.quota {
            let needed = self
                .used_bytes_without(key)
                .saturating_add(key.len())
                .saturating_add(value.len());

            if needed > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    limit,
                });
            }
        }

        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn set_get_remove() -> TestResult {
        let storage = MemoryStorage::new();

        assert_eq!(storage.get("cart")?, None);

        storage.set("cart", "{}")?;
        assert_eq!(storage.get("cart")?.as_deref(), Some("{}"));
        assert_eq!(storage.len(), 1);

        storage.remove("cart")?;
        assert_eq!(storage.get("cart")?, None);
        assert!(storage.is_empty());

        Ok(())
    }

    #[test]
    fn removing_missing_key_is_ok() -> TestResult {
        let storage = MemoryStorage::new();

        storage.remove("missing")?;

        Ok(())
    }

    #[test]
    fn quota_rejects_oversized_writes() -> TestResult {
        let storage = MemoryStorage::with_quota(10);

        storage.set("k", "12345")?;

        let result = storage.set("other", "123456");
        assert!(
            matches!(result, Err(StorageError::QuotaExceeded { limit: 10, .. })),
            "expected QuotaExceeded, got {result:?}"
        );

        // Overwriting an entry only counts its new size.
        storage.set("k", "123456789")?;
        assert_eq!(storage.get("k")?.as_deref(), Some("123456789"));

        Ok(())
    }

    fn write_through<S: KeyValueStorage>(storage: S) -> Result<(), StorageError> {
        storage.set("wishlist", "[]")
    }

    #[test]
    fn shared_handles_see_the_same_entries() -> TestResult {
        let storage = MemoryStorage::new();
        write_through(&storage)?;
        assert_eq!(storage.get("wishlist")?.as_deref(), Some("[]"));

        let shared = Rc::new(MemoryStorage::new());
        write_through(Rc::clone(&shared))?;
        assert_eq!(shared.get("wishlist")?.as_deref(), Some("[]"));

        Ok(())
    }
}
