//! Prelude for convenient imports.
//!
//! ```rust
//! use boutique_sdk::prelude::*;
//! ```

// SDK
pub use crate::config::{ConfigError, StorefrontConfig};
pub use crate::logging::init_logging;
pub use crate::storefront::Storefront;

// Storage
pub use boutique_cache::{Cache, CacheError, FileStorage, MemoryStorage, Storage};

// Catalog, search and collections
pub use boutique_commerce::prelude::*;

// Toasts
pub use boutique_notify::{QueueConfig, Severity, ToastId, ToastMessage, ToastQueue, ToastRequest};
