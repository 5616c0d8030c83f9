//! crates/moodmorph_core/src/store.rs
//!
//! The Entry Store: the single in-memory source of truth for journal entries,
//! flushed to a `KeyValueStorage` after every mutation.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::codec::{decode_persisted, encode_persisted};
use crate::domain::JournalEntry;
use crate::ports::{KeyValueStorage, PortError, PortResult};

/// The fixed key the journal is persisted under.
pub const STORAGE_KEY: &str = "moodmorph_entries";

/// Entries in insertion order, newest first.
///
/// Every mutation is written to storage before it becomes visible; a failed
/// write leaves the in-memory collection unchanged.
pub struct EntryStore {
    storage: Arc<dyn KeyValueStorage>,
    entries: Vec<JournalEntry>,
}

impl EntryStore {
    /// Initializes the store from persisted state.
    ///
    /// A missing or unreadable blob yields an empty store; the failure is
    /// logged and never surfaced.
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Self {
        let entries = match storage.get(STORAGE_KEY) {
            Ok(Some(blob)) => decode_persisted(&blob),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read persisted entries, starting empty: {}", e);
                Vec::new()
            }
        };
        info!("Entry store loaded with {} entries", entries.len());
        Self { storage, entries }
    }

    /// Writes the full collection to storage.
    pub fn save(&self) -> PortResult<()> {
        self.persist(&self.entries)
    }

    fn persist(&self, entries: &[JournalEntry]) -> PortResult<()> {
        let blob = encode_persisted(entries)
            .map_err(|e| PortError::Unexpected(format!("Failed to encode entries: {}", e)))?;
        self.storage.set(STORAGE_KEY, &blob)
    }

    /// Replaces the collection with `next` once it has been persisted.
    fn commit(&mut self, next: Vec<JournalEntry>) -> PortResult<()> {
        self.persist(&next)?;
        self.entries = next;
        Ok(())
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prepends `entry`, independent of its `date`.
    pub fn add(&mut self, entry: JournalEntry) -> PortResult<()> {
        debug!("Adding entry {}", entry.id);
        let mut next = Vec::with_capacity(self.entries.len() + 1);
        next.push(entry);
        next.extend(self.entries.iter().cloned());
        self.commit(next)
    }

    /// Deletes the entry with `id`. Returns whether anything was removed;
    /// an unknown id is not an error.
    pub fn remove(&mut self, id: &str) -> PortResult<bool> {
        let next: Vec<JournalEntry> = self.entries.iter().filter(|e| e.id != id).cloned().collect();
        let removed = next.len() != self.entries.len();
        debug!("Remove entry {}: removed={}", id, removed);
        self.commit(next)?;
        Ok(removed)
    }

    /// Prepends the imported entries whose ids are not yet present, keeping
    /// their relative order. Returns how many were merged.
    pub fn merge(&mut self, imported: Vec<JournalEntry>) -> PortResult<usize> {
        let mut known: HashSet<String> = self.entries.iter().map(|e| e.id.clone()).collect();
        // Duplicates inside the payload itself are merged once.
        let fresh: Vec<JournalEntry> = imported
            .into_iter()
            .filter(|e| known.insert(e.id.clone()))
            .collect();

        let merged = fresh.len();
        if merged > 0 {
            let mut next = fresh;
            next.extend(self.entries.iter().cloned());
            self.commit(next)?;
        }
        info!("Merged {} imported entries", merged);
        Ok(merged)
    }
}
