//! Note use-case service.
//!
//! Implements list/create/get/update/remove over a [`NoteStore`]. The service
//! keeps no state of its own; every call reads or writes through the store.
//!
//! Inputs are expected to be validated and trimmed by the HTTP boundary.
//! In particular `update` does not re-check that a note keeps a non-empty
//! title or content.

use chrono::Utc;
use std::sync::Arc;

use notes_types::Note;

use super::error::NoteError;
use super::query::{self, ListQuery, NotePage};
use super::store::NoteStore;

/// Partial update. `None` leaves a field untouched, `Some("")` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

pub struct NoteService {
    store: Arc<NoteStore>,
}

impl NoteService {
    pub fn new(store: Arc<NoteStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    /// Filtered, paginated list, newest `updated_at` first
    pub fn list(&self, query: &ListQuery) -> NotePage {
        self.store.read(|notes| query::apply(notes, query))
    }

    pub fn create(&self, title: String, content: String) -> Note {
        let note = self.store.insert(title, content, Utc::now());
        log::debug!("[NOTES] Created note {}", note.id);
        note
    }

    pub fn get(&self, id: &str) -> Result<Note, NoteError> {
        self.store
            .read(|notes| notes.iter().find(|n| n.id == id).cloned())
            .ok_or_else(|| NoteError::NotFound(id.to_string()))
    }

    /// Apply the present fields and always bump `updated_at`
    pub fn update(&self, id: &str, changes: NoteChanges) -> Result<Note, NoteError> {
        let updated = self.store.mutate(|notes| {
            let note = notes.iter_mut().find(|n| n.id == id)?;
            if let Some(title) = changes.title {
                note.title = title;
            }
            if let Some(content) = changes.content {
                note.content = content;
            }
            note.updated_at = Utc::now();
            Some(note.clone())
        });

        match updated {
            Some(note) => {
                log::debug!("[NOTES] Updated note {}", id);
                Ok(note)
            }
            None => Err(NoteError::NotFound(id.to_string())),
        }
    }

    pub fn remove(&self, id: &str) -> Result<(), NoteError> {
        let removed = self.store.mutate(|notes| {
            let idx = notes.iter().position(|n| n.id == id)?;
            Some(notes.remove(idx))
        });

        match removed {
            Some(_) => {
                log::debug!("[NOTES] Removed note {}", id);
                Ok(())
            }
            None => Err(NoteError::NotFound(id.to_string())),
        }
    }
}
