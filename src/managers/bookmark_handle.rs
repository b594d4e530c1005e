//! Shared handle to the bookmark store.
//!
//! Every consumer receives a clone of the same `BookmarkHandle`; the mutex
//! serializes operations so each mutation and its storage write happen as one
//! step, even when several threads toggle at once.

use std::sync::{Arc, Mutex, MutexGuard};

use log::warn;

use super::bookmark_store::{BookmarkStore, BookmarkStoreTrait};
use crate::types::bookmark::{BookmarkRecord, NewBookmark};
use crate::types::errors::StorageError;

#[derive(Clone)]
pub struct BookmarkHandle {
    inner: Arc<Mutex<BookmarkStore>>,
}

impl BookmarkHandle {
    pub fn new(store: BookmarkStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Locks the store. A poisoned lock is recovered: every operation updates
    /// memory before it writes, so the store is consistent even if a holder panicked.
    fn lock(&self) -> MutexGuard<'_, BookmarkStore> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            warn!("bookmark store lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Runs `f` with exclusive access to the store.
    pub fn with_store<R>(&self, f: impl FnOnce(&mut BookmarkStore) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn initialize(&self) {
        self.lock().initialize()
    }

    pub fn add(&self, manga: NewBookmark) -> bool {
        self.lock().add(manga)
    }

    pub fn remove(&self, id: &str) -> bool {
        self.lock().remove(id)
    }

    pub fn toggle(&self, manga: NewBookmark) -> bool {
        self.lock().toggle(manga)
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.lock().is_bookmarked(id)
    }

    pub fn get(&self, id: &str) -> Option<BookmarkRecord> {
        self.lock().get(id)
    }

    pub fn list(&self) -> Vec<BookmarkRecord> {
        self.lock().list()
    }

    pub fn search(&self, query: &str) -> Vec<BookmarkRecord> {
        self.lock().search(query)
    }

    pub fn clear_all(&self) {
        self.lock().clear_all()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn last_persist_error(&self) -> Option<StorageError> {
        self.lock().last_persist_error().cloned()
    }
}
