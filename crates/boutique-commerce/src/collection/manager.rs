//! Ordered entry list mirrored to a storage slot.

use crate::error::CommerceError;
use boutique_cache::Cache;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use tokio::sync::watch;
use tracing::{debug, error, warn};

/// An entry that can live in a [`CollectionManager`].
pub trait CollectionEntry: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Uniqueness key. At most one entry per key is stored.
    type Key: PartialEq + Clone + fmt::Debug;

    fn key(&self) -> Self::Key;

    /// Fold an incoming entry with the same key into this one.
    ///
    /// Returns whether this entry changed. On error the entry must be left
    /// untouched.
    fn merge(&mut self, incoming: Self) -> Result<bool, CommerceError>;

    /// Contribution to the collection's total item count.
    fn count(&self) -> u64 {
        1
    }

    /// Check the entry's own invariants.
    fn validate(&self) -> Result<(), CommerceError> {
        Ok(())
    }
}

/// What `add` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new entry was appended.
    Inserted,
    /// An existing entry absorbed the new one.
    Merged,
    /// The key was already present and nothing changed.
    Unchanged,
}

/// Generic add/remove/persist collection behind the cart and the wishlist.
///
/// The full snapshot is written to the slot after every mutation, before
/// the mutating call returns. If that write fails the mutation is rolled
/// back, so retrying a failed call applies it once. A slot that cannot be
/// decoded on load is purged and the collection starts empty.
pub struct CollectionManager<E: CollectionEntry> {
    cache: Cache,
    slot: String,
    entries: Vec<E>,
    state: watch::Sender<Vec<E>>,
}

impl<E: CollectionEntry> CollectionManager<E> {
    /// Load the collection stored in `slot`.
    pub fn load(cache: Cache, slot: impl Into<String>) -> Self {
        let slot = slot.into();
        let entries = match cache.get::<Vec<E>>(&slot) {
            Ok(Some(stored)) => {
                let stored_len = stored.len();
                let entries = normalize(&slot, stored);
                if entries.len() != stored_len {
                    rewrite(&cache, &slot, &entries);
                }
                entries
            }
            Ok(None) => Vec::new(),
            Err(e) if e.is_corrupt() => {
                warn!(slot = %slot, error = %e, "stored collection is corrupt, resetting");
                purge(&cache, &slot);
                Vec::new()
            }
            Err(e) => {
                warn!(slot = %slot, error = %e, "storage unreadable, starting empty");
                Vec::new()
            }
        };
        debug!(slot = %slot, entries = entries.len(), "collection loaded");

        let (state, _) = watch::channel(entries.clone());
        Self {
            cache,
            slot,
            entries,
            state,
        }
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[E] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &E::Key) -> Option<&E> {
        self.entries.iter().find(|e| &e.key() == key)
    }

    pub fn contains(&self, key: &E::Key) -> bool {
        self.get(key).is_some()
    }

    /// Sum of every entry's `count()`.
    pub fn total_count(&self) -> u64 {
        self.entries.iter().map(CollectionEntry::count).sum()
    }

    /// Watch the collection. The receiver always holds the latest snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Vec<E>> {
        self.state.subscribe()
    }

    /// Append `entry`, or merge it into the entry with the same key.
    pub fn add(&mut self, entry: E) -> Result<AddOutcome, CommerceError> {
        entry.validate()?;
        let key = entry.key();
        let previous = self.entries.clone();

        let outcome = match self.entries.iter_mut().find(|e| e.key() == key) {
            Some(existing) => {
                if existing.merge(entry)? {
                    AddOutcome::Merged
                } else {
                    AddOutcome::Unchanged
                }
            }
            None => {
                self.entries.push(entry);
                AddOutcome::Inserted
            }
        };

        debug!(slot = %self.slot, ?key, ?outcome, "collection add");
        if outcome != AddOutcome::Unchanged {
            self.commit(previous)?;
        }
        Ok(outcome)
    }

    /// Remove the entry with `key`. Returns false if there was none.
    pub fn remove(&mut self, key: &E::Key) -> Result<bool, CommerceError> {
        let Some(index) = self.entries.iter().position(|e| &e.key() == key) else {
            return Ok(false);
        };
        let previous = self.entries.clone();
        self.entries.remove(index);

        debug!(slot = %self.slot, ?key, "collection remove");
        self.commit(previous)?;
        Ok(true)
    }

    /// Apply `f` to the entry with `key`. The change is kept only if the
    /// updated entry still validates. Returns false if there was no entry.
    pub fn update_with(
        &mut self,
        key: &E::Key,
        f: impl FnOnce(&mut E),
    ) -> Result<bool, CommerceError> {
        let Some(existing) = self.entries.iter_mut().find(|e| &e.key() == key) else {
            return Ok(false);
        };

        let mut updated = existing.clone();
        f(&mut updated);
        updated.validate()?;
        let previous = std::mem::replace(existing, updated);

        debug!(slot = %self.slot, ?key, "collection update");
        if let Err(e) = self.write() {
            if let Some(current) = self.entries.iter_mut().find(|e| &e.key() == key) {
                *current = previous;
            }
            return Err(e);
        }
        self.publish();
        Ok(true)
    }

    /// Remove every entry.
    pub fn clear(&mut self) -> Result<(), CommerceError> {
        let previous = std::mem::take(&mut self.entries);
        debug!(slot = %self.slot, "collection cleared");
        self.commit(previous)
    }

    /// Write the current entries, restoring `previous` if the write fails.
    /// Observers only see snapshots that reached storage.
    fn commit(&mut self, previous: Vec<E>) -> Result<(), CommerceError> {
        if let Err(e) = self.write() {
            self.entries = previous;
            return Err(e);
        }
        self.publish();
        Ok(())
    }

    fn write(&self) -> Result<(), CommerceError> {
        self.cache.set(&self.slot, &self.entries).map_err(|e| {
            error!(slot = %self.slot, error = %e, "failed to persist collection, change discarded");
            CommerceError::from(e)
        })
    }

    fn publish(&self) {
        self.state.send_replace(self.entries.clone());
    }
}

impl<E: CollectionEntry + fmt::Debug> fmt::Debug for CollectionManager<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionManager")
            .field("slot", &self.slot)
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

/// Fold duplicate keys in a stored snapshot. Entries that fail validation,
/// or duplicates that cannot be merged, are dropped one by one.
fn normalize<E: CollectionEntry>(slot: &str, stored: Vec<E>) -> Vec<E> {
    let mut entries: Vec<E> = Vec::with_capacity(stored.len());
    for entry in stored {
        let key = entry.key();
        if let Err(e) = entry.validate() {
            warn!(slot = %slot, ?key, error = %e, "dropping invalid stored entry");
            continue;
        }
        match entries.iter_mut().find(|e| e.key() == key) {
            Some(existing) => {
                let mut merged = existing.clone();
                match merged.merge(entry) {
                    Ok(_) => *existing = merged,
                    Err(e) => {
                        warn!(slot = %slot, ?key, error = %e, "dropping stored duplicate");
                    }
                }
            }
            None => entries.push(entry),
        }
    }
    entries
}

fn rewrite<E: CollectionEntry>(cache: &Cache, slot: &str, entries: &[E]) {
    if let Err(e) = cache.set(slot, entries) {
        error!(slot = %slot, error = %e, "failed to rewrite cleaned collection");
    }
}

fn purge(cache: &Cache, slot: &str) {
    if let Err(e) = cache.delete(slot) {
        error!(slot = %slot, error = %e, "failed to purge corrupt slot");
    }
}
