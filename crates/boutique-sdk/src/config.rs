//! Storefront configuration.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! [storage]
//! dir = "/var/lib/boutique"   # omit to keep collections in memory
//! namespace = "boutique"
//! cart_slot = "cart"
//! wishlist_slot = "wishlist"
//!
//! [toasts]
//! capacity = 5
//! default_duration_ms = 3000
//!
//! [catalog]
//! currency = "EUR"
//! path = "catalog.json"       # omit to use the built-in sample catalog
//!
//! [logging]
//! level = "info"
//! format = "human"
//! ```

use boutique_commerce::Currency;
use boutique_notify::{QueueConfig, DEFAULT_CAPACITY, DEFAULT_DURATION};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Top-level storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    pub storage: StorageConfig,
    pub toasts: ToastConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.toasts.capacity == 0 {
            return Err(ConfigError::Invalid("toasts.capacity must be at least 1".into()));
        }
        for (field, value) in [
            ("storage.namespace", &self.storage.namespace),
            ("storage.cart_slot", &self.storage.cart_slot),
            ("storage.wishlist_slot", &self.storage.wishlist_slot),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{field} must not be empty")));
            }
        }
        // Slots must map one-to-one onto file names after the namespace.
        for (field, value) in [
            ("storage.cart_slot", &self.storage.cart_slot),
            ("storage.wishlist_slot", &self.storage.wishlist_slot),
        ] {
            if !value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            {
                return Err(ConfigError::Invalid(format!(
                    "{field} may only contain ASCII letters, digits, '-' and '_'"
                )));
            }
        }
        if self.storage.cart_slot == self.storage.wishlist_slot {
            return Err(ConfigError::Invalid(
                "storage.cart_slot and storage.wishlist_slot must differ".into(),
            ));
        }
        Ok(())
    }

    /// Create with an on-disk storage directory.
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage.dir = Some(dir.into());
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.catalog.currency = currency;
        self
    }
}

/// Where collections are persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one JSON file per slot. `None` keeps everything in
    /// memory.
    pub dir: Option<PathBuf>,
    /// Prefix shared by every slot.
    pub namespace: String,
    pub cart_slot: String,
    pub wishlist_slot: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            namespace: "boutique".to_string(),
            cart_slot: "cart".to_string(),
            wishlist_slot: "wishlist".to_string(),
        }
    }
}

impl StorageConfig {
    pub fn cart_key(&self) -> String {
        boutique_cache::cache_key!(&self.namespace, self.cart_slot)
    }

    pub fn wishlist_key(&self) -> String {
        boutique_cache::cache_key!(&self.namespace, self.wishlist_slot)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    pub capacity: usize,
    /// Zero makes toasts sticky unless a duration is given per message.
    pub default_duration_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            default_duration_ms: DEFAULT_DURATION.as_millis() as u64,
        }
    }
}

impl ToastConfig {
    pub fn queue_config(&self) -> QueueConfig {
        QueueConfig::default()
            .with_capacity(self.capacity)
            .with_default_duration(Some(Duration::from_millis(self.default_duration_ms)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub currency: Currency,
    /// JSON catalog file. `None` loads the built-in sample catalog.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Human,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}
