//! # Boutique SDK
//!
//! Wires the storefront crates together for a shopper session:
//!
//! - [`StorefrontConfig`]: TOML configuration with defaults for every field
//! - [`init_logging`]: tracing subscriber setup
//! - [`Storefront`]: catalog, cart, wishlist and toast queue built from a
//!   config and an injected storage backend
//!
//! ## Quick Start
//!
//! ```rust
//! use boutique_sdk::prelude::*;
//!
//! let config = StorefrontConfig::from_toml_str("[toasts]\ncapacity = 3").unwrap();
//! let store = Storefront::from_config(config).unwrap();
//!
//! let femme = store.browse(&CategorySelector::parse("femme"), &FilterConfiguration::new());
//! assert_eq!(femme.len(), 3);
//! ```

pub mod config;
pub mod logging;
pub mod prelude;
pub mod storefront;

pub use config::{
    CatalogConfig, ConfigError, LogFormat, LoggingConfig, StorageConfig, StorefrontConfig,
    ToastConfig,
};
pub use logging::init_logging;
pub use storefront::Storefront;

// Re-export the storefront crates
pub use boutique_cache as cache;
pub use boutique_commerce as commerce;
pub use boutique_notify as notify;
