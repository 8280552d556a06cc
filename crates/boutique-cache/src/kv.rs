//! Typed slot access with automatic JSON serialization.

use crate::{CacheError, Storage};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Type-safe cache over a [`Storage`] backend.
///
/// Values are stored as JSON documents, one per slot.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn Storage>,
}

impl Cache {
    /// Wrap a storage backend.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use boutique_cache::{Cache, MemoryStorage};
    ///
    /// let cache = Cache::new(Arc::new(MemoryStorage::new()));
    /// cache.set("boutique:cart", &vec![1, 2, 3]).unwrap();
    /// let items: Option<Vec<i32>> = cache.get("boutique:cart").unwrap();
    /// assert_eq!(items, Some(vec![1, 2, 3]));
    /// ```
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    /// Get a value from a slot.
    ///
    /// Returns `None` if the slot is empty and `CacheError::Serialize` if the
    /// stored document does not decode as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.read(key)? {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    /// Store a value in a slot, replacing what was there.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let payload = serde_json::to_string(value)?;
        self.store.write(key, &payload)
    }

    /// Delete a slot.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.remove(key)
    }

    /// Check if a slot holds a value.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.store.read(key)?.is_some())
    }

    /// The underlying backend.
    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.store
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

/// Helper to build slot names with namespacing.
///
/// # Example
///
/// ```rust
/// use boutique_cache::cache_key;
///
/// let key = cache_key!("boutique", "cart");
/// assert_eq!(key, "boutique:cart");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}
