//! Type-safe storage slots for the Boutique storefront.
//!
//! Provides a small local-storage style API: named slots holding JSON
//! documents, backed either by memory or by a directory on disk.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use boutique_cache::{cache_key, Cache, MemoryStorage};
//!
//! let cache = Cache::new(Arc::new(MemoryStorage::new()));
//! let slot = cache_key!("boutique", "wishlist");
//!
//! cache.set(&slot, &vec!["4"]).unwrap();
//! let ids: Option<Vec<String>> = cache.get(&slot).unwrap();
//! assert_eq!(ids, Some(vec!["4".to_string()]));
//!
//! cache.delete(&slot).unwrap();
//! ```

mod error;
mod kv;
mod storage;

pub use error::CacheError;
pub use kv::Cache;
pub use storage::{FileStorage, MemoryStorage, Storage};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStorage, MemoryStorage, Storage};
}
