//! Storage backends holding raw string payloads in named slots.
//!
//! A slot is the local-storage analogue: one key, one serialized document.

use crate::CacheError;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// A durable key/value backend addressed by slot name.
///
/// Implementations must make `write` visible to the next `read` of the same
/// slot before returning.
pub trait Storage: Send + Sync {
    /// Read the raw payload of a slot, `None` if the slot is empty.
    fn read(&self, slot: &str) -> Result<Option<String>, CacheError>;

    /// Replace the payload of a slot.
    fn write(&self, slot: &str, payload: &str) -> Result<(), CacheError>;

    /// Remove a slot. Removing an empty slot is not an error.
    fn remove(&self, slot: &str) -> Result<(), CacheError>;
}

/// In-process storage, lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_slots<R>(
        &self,
        f: impl FnOnce(&mut HashMap<String, String>) -> R,
    ) -> Result<R, CacheError> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| CacheError::Unavailable("memory storage lock poisoned".to_string()))?;
        Ok(f(&mut slots))
    }
}

impl Storage for MemoryStorage {
    fn read(&self, slot: &str) -> Result<Option<String>, CacheError> {
        self.with_slots(|slots| slots.get(slot).cloned())
    }

    fn write(&self, slot: &str, payload: &str) -> Result<(), CacheError> {
        self.with_slots(|slots| {
            slots.insert(slot.to_string(), payload.to_string());
        })
    }

    fn remove(&self, slot: &str) -> Result<(), CacheError> {
        self.with_slots(|slots| {
            slots.remove(slot);
        })
    }
}

/// Directory-backed storage: one `<slot>.json` file per slot.
///
/// Writes go to a temporary file that is renamed over the target, so a crash
/// mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Open (and create if needed) a storage directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        debug!(path = %root.display(), "opened file storage");
        Ok(Self { root })
    }

    /// Directory holding the slot files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, slot: &str) -> Result<PathBuf, CacheError> {
        if slot.is_empty() {
            return Err(CacheError::InvalidSlot(slot.to_string()));
        }
        let file_name: String = slot
            .chars()
            .map(|c| match c {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' => c,
                _ => '_',
            })
            .collect();
        if file_name.chars().all(|c| c == '.') {
            return Err(CacheError::InvalidSlot(slot.to_string()));
        }
        Ok(self.root.join(format!("{file_name}.json")))
    }
}

impl Storage for FileStorage {
    fn read(&self, slot: &str) -> Result<Option<String>, CacheError> {
        let path = self.slot_path(slot)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| CacheError::Corrupt {
                slot: slot.to_string(),
                reason: e.to_string(),
            })
    }

    fn write(&self, slot: &str, payload: &str) -> Result<(), CacheError> {
        let path = self.slot_path(slot)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<(), CacheError> {
        let path = self.slot_path(slot)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
