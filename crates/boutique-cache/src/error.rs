//! Cache error types.

use thiserror::Error;

/// Errors that can occur when using a storage slot.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to read or write the backing store.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The store cannot be used (e.g. a poisoned lock).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Slot name cannot be mapped onto the backing store.
    #[error("Invalid slot name: {0}")]
    InvalidSlot(String),

    /// The stored payload is not readable text.
    #[error("Corrupt slot {slot}: {reason}")]
    Corrupt { slot: String, reason: String },
}

impl CacheError {
    /// Whether the stored payload itself is damaged, as opposed to the store
    /// being unreachable.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, CacheError::Serialize(_) | CacheError::Corrupt { .. })
    }
}
