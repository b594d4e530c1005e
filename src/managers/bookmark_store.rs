//! Bookmark store for mangashelf.
//!
//! Implements `BookmarkStoreTrait`: the authoritative in-memory shelf of
//! bookmarked manga, mirrored in full to a single storage slot after every
//! mutation.
//!
//! Storage problems never reach the caller. A missing or unreadable payload
//! starts the session with an empty shelf; a failed write is logged and
//! remembered in `last_persist_error`, while the in-memory shelf stays
//! authoritative.

use std::collections::HashSet;

use chrono::Utc;
use log::{debug, error, info, warn};

use crate::storage::StorageSlot;
use crate::types::bookmark::{BookmarkRecord, NewBookmark};
use crate::types::errors::StorageError;

/// Trait defining bookmark shelf operations.
pub trait BookmarkStoreTrait {
    /// Loads the persisted shelf, replacing whatever is in memory.
    fn initialize(&mut self);
    /// Appends a bookmark unless one with the same id exists. Returns `true` if inserted.
    fn add(&mut self, manga: NewBookmark) -> bool;
    /// Removes the bookmark with `id`. Returns `true` if one was removed.
    fn remove(&mut self, id: &str) -> bool;
    /// Removes `manga.id` if bookmarked, adds it otherwise. Returns the new membership.
    fn toggle(&mut self, manga: NewBookmark) -> bool;
    fn is_bookmarked(&self, id: &str) -> bool;
    fn get(&self, id: &str) -> Option<BookmarkRecord>;
    /// Snapshot of the whole shelf, oldest first.
    fn list(&self) -> Vec<BookmarkRecord>;
    /// Bookmarks whose title or original title contains `query`, ignoring case.
    fn search(&self, query: &str) -> Vec<BookmarkRecord>;
    fn clear_all(&mut self);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// The last failed write, if the most recent write failed.
    fn last_persist_error(&self) -> Option<&StorageError>;
}

/// Bookmark store owning its storage slot.
pub struct BookmarkStore {
    slot: Box<dyn StorageSlot>,
    records: Vec<BookmarkRecord>,
    ids: HashSet<String>,
    last_persist_error: Option<StorageError>,
}

impl BookmarkStore {
    /// Creates an empty store over `slot`. Call `initialize` to load persisted bookmarks.
    pub fn new(slot: Box<dyn StorageSlot>) -> Self {
        Self {
            slot,
            records: Vec::new(),
            ids: HashSet::new(),
            last_persist_error: None,
        }
    }

    /// Creates a store over `slot` and loads it.
    pub fn open(slot: Box<dyn StorageSlot>) -> Self {
        let mut store = Self::new(slot);
        store.initialize();
        store
    }

    pub fn slot_key(&self) -> &str {
        self.slot.key()
    }

    /// Reads and decodes the slot. `Ok(None)` means nothing was ever stored.
    fn load(&self) -> Result<Option<Vec<BookmarkRecord>>, StorageError> {
        let Some(payload) = self.slot.read()? else {
            return Ok(None);
        };
        serde_json::from_str::<Vec<BookmarkRecord>>(&payload)
            .map(Some)
            .map_err(|e| StorageError::Corrupt(e.to_string()))
    }

    /// Rebuilds the collection from decoded records, keeping the first of any repeated id.
    fn replace_records(&mut self, records: Vec<BookmarkRecord>) {
        self.records.clear();
        self.ids.clear();
        for record in records {
            if self.ids.insert(record.id.clone()) {
                self.records.push(record);
            } else {
                warn!(
                    "dropping duplicate bookmark {} from slot {}",
                    record.id,
                    self.slot.key()
                );
            }
        }
    }

    /// Writes the full collection to the slot.
    fn persist(&mut self) {
        let result = serde_json::to_string(&self.records)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))
            .and_then(|json| self.slot.write(&json));

        match result {
            Ok(()) => {
                debug!(
                    "persisted {} bookmarks to slot {}",
                    self.records.len(),
                    self.slot.key()
                );
                self.last_persist_error = None;
            }
            Err(e) => {
                error!(
                    "failed to persist bookmarks to slot {}, keeping in-memory state: {}",
                    self.slot.key(),
                    e
                );
                self.last_persist_error = Some(e);
            }
        }
    }
}

impl BookmarkStoreTrait for BookmarkStore {
    fn initialize(&mut self) {
        match self.load() {
            Ok(Some(records)) => {
                self.replace_records(records);
                info!(
                    "loaded {} bookmarks from slot {}",
                    self.records.len(),
                    self.slot.key()
                );
            }
            Ok(None) => {
                self.replace_records(Vec::new());
                debug!("slot {} is empty, starting with no bookmarks", self.slot.key());
            }
            Err(e) => {
                self.replace_records(Vec::new());
                warn!(
                    "could not load bookmarks from slot {}, starting empty: {}",
                    self.slot.key(),
                    e
                );
            }
        }
    }

    fn add(&mut self, manga: NewBookmark) -> bool {
        if self.ids.contains(&manga.id) {
            return false;
        }
        self.ids.insert(manga.id.clone());
        self.records.push(BookmarkRecord::from_new(manga, Utc::now()));
        self.persist();
        true
    }

    fn remove(&mut self, id: &str) -> bool {
        if !self.ids.remove(id) {
            return false;
        }
        self.records.retain(|record| record.id != id);
        self.persist();
        true
    }

    fn toggle(&mut self, manga: NewBookmark) -> bool {
        if self.is_bookmarked(&manga.id) {
            self.remove(&manga.id);
            false
        } else {
            self.add(manga);
            true
        }
    }

    fn is_bookmarked(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    fn get(&self, id: &str) -> Option<BookmarkRecord> {
        if !self.ids.contains(id) {
            return None;
        }
        self.records.iter().find(|record| record.id == id).cloned()
    }

    fn list(&self) -> Vec<BookmarkRecord> {
        self.records.clone()
    }

    fn search(&self, query: &str) -> Vec<BookmarkRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.list();
        }
        self.records
            .iter()
            .filter(|record| record.matches(&needle))
            .cloned()
            .collect()
    }

    fn clear_all(&mut self) {
        self.records.clear();
        self.ids.clear();
        self.persist();
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn last_persist_error(&self) -> Option<&StorageError> {
        self.last_persist_error.as_ref()
    }
}
