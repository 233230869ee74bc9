//! NoteStore — the authoritative in-memory note collection
//!
//! Optionally mirrored to a JSON file. The file is loaded once at startup and
//! rewritten after every mutation. Write failures are logged and recorded in
//! [`PersistenceStatus`] but never undo the in-memory change.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::path::PathBuf;
use uuid::Uuid;

use notes_types::Note;

use super::file_ops;

/// Durability counters exposed to operators through the health endpoint
#[derive(Debug, Clone, Default, Serialize)]
pub struct PersistenceStatus {
    /// Backing file, `None` for an in-memory store
    pub path: Option<String>,
    pub writes: u64,
    pub failed_writes: u64,
    /// Cleared by the next successful write
    pub last_error: Option<String>,
}

impl PersistenceStatus {
    pub fn healthy(&self) -> bool {
        self.last_error.is_none()
    }
}

struct StoreState {
    notes: Vec<Note>,
    status: PersistenceStatus,
}

/// Note collection guarded by a single lock covering mutate-then-persist
pub struct NoteStore {
    path: Option<PathBuf>,
    state: Mutex<StoreState>,
}

impl NoteStore {
    /// Open a file-backed store. Never fails: a missing file starts empty and
    /// an unreadable or malformed one is discarded.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let notes = match file_ops::read_notes_file(&path) {
            Ok(Some(notes)) => {
                log::info!("[NOTES] Loaded {} notes from {}", notes.len(), path.display());
                notes
            }
            Ok(None) => {
                log::info!("[NOTES] No notes file at {}, starting empty", path.display());
                Vec::new()
            }
            Err(e) => {
                log::warn!(
                    "[NOTES] Discarding unreadable notes file {}: {}",
                    path.display(),
                    e
                );
                Vec::new()
            }
        };

        let status = PersistenceStatus {
            path: Some(path.to_string_lossy().to_string()),
            ..Default::default()
        };

        Self {
            path: Some(path),
            state: Mutex::new(StoreState { notes, status }),
        }
    }

    /// A store that never touches the filesystem
    pub fn in_memory() -> Self {
        Self {
            path: None,
            state: Mutex::new(StoreState {
                notes: Vec::new(),
                status: PersistenceStatus::default(),
            }),
        }
    }

    /// New note id: UUID v7, a millisecond timestamp followed by random bits
    pub fn generate_id() -> String {
        Uuid::now_v7().to_string()
    }

    pub fn len(&self) -> usize {
        self.state.lock().notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn persistence_status(&self) -> PersistenceStatus {
        self.state.lock().status.clone()
    }

    /// Run a read-only closure over the collection in insertion order
    pub fn read<R>(&self, f: impl FnOnce(&[Note]) -> R) -> R {
        let state = self.state.lock();
        f(&state.notes)
    }

    /// Assign an id, append the note and persist
    pub fn insert(&self, title: String, content: String, at: DateTime<Utc>) -> Note {
        let note = Note {
            id: Self::generate_id(),
            title,
            content,
            created_at: at,
            updated_at: at,
        };

        let mut state = self.state.lock();
        state.notes.push(note.clone());
        self.persist(&mut state);
        note
    }

    /// Mutate the collection in place. The store is persisted only when the
    /// closure reports a change by returning `Some`.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut Vec<Note>) -> Option<R>) -> Option<R> {
        let mut state = self.state.lock();
        let result = f(&mut state.notes)?;
        self.persist(&mut state);
        Some(result)
    }

    fn persist(&self, state: &mut StoreState) {
        let Some(path) = self.path.as_deref() else {
            return;
        };

        match file_ops::write_notes_file(path, &state.notes) {
            Ok(()) => {
                state.status.writes += 1;
                state.status.last_error = None;
                log::debug!("[NOTES] Persisted {} notes to {}", state.notes.len(), path.display());
            }
            Err(e) => {
                state.status.failed_writes += 1;
                state.status.last_error = Some(e.to_string());
                log::error!("[NOTES] Failed to persist notes to {}: {}", path.display(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_open_missing_file_starts_empty() {
        let dir = tempdir().unwrap();
        let store = NoteStore::open(dir.path().join("notes.json"));
        assert!(store.is_empty());
        assert!(!dir.path().join("notes.json").exists());
    }

    #[test]
    fn test_open_malformed_file_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(&path, "{ this is not json").unwrap();

        let store = NoteStore::open(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn test_open_non_array_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(&path, r#"{"notes": []}"#).unwrap();

        assert!(NoteStore::open(&path).is_empty());
    }

    #[test]
    fn test_insert_persists_and_reloads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data/notes.json");

        let store = NoteStore::open(&path);
        let a = store.insert("A".to_string(), "first".to_string(), Utc::now());
        let b = store.insert("B".to_string(), String::new(), Utc::now());
        assert!(path.exists());
        assert_eq!(store.persistence_status().writes, 2);

        let reopened = NoteStore::open(&path);
        let notes = reopened.read(|notes| notes.to_vec());
        assert_eq!(notes, vec![a, b]);
    }

    #[test]
    fn test_reload_keeps_instant_but_normalizes_millis() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(
            &path,
            r#"[{"id":"a","title":"t","content":"","createdAt":"2024-01-01T00:00:00.000Z","updatedAt":"2024-01-01T00:00:00.000Z"}]"#,
        )
        .unwrap();

        let store = NoteStore::open(&path);
        let loaded = store.read(|notes| notes[0].clone());
        assert_eq!(loaded.created_at.to_rfc3339(), "2024-01-01T00:00:00+00:00");

        store.insert("b".to_string(), String::new(), Utc::now());
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains(r#""createdAt": "2024-01-01T00:00:00Z""#));
        assert!(!written.contains(".000Z"));
    }

    #[test]
    fn test_mutate_none_skips_persist() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.json");
        let store = NoteStore::open(&path);

        let result: Option<()> = store.mutate(|_| None);
        assert!(result.is_none());
        assert!(!path.exists());
        assert_eq!(store.persistence_status().writes, 0);
    }

    #[test]
    fn test_write_failure_keeps_mutation() {
        let dir = tempdir().unwrap();
        // A regular file where the data directory should be
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let store = NoteStore::open(blocker.join("notes.json"));
        let note = store.insert("kept".to_string(), String::new(), Utc::now());

        assert_eq!(store.len(), 1);
        assert_eq!(store.read(|notes| notes[0].id.clone()), note.id);

        let status = store.persistence_status();
        assert_eq!(status.failed_writes, 1);
        assert!(!status.healthy());
    }

    #[test]
    fn test_in_memory_never_writes() {
        let store = NoteStore::in_memory();
        store.insert("x".to_string(), String::new(), Utc::now());

        let status = store.persistence_status();
        assert!(status.path.is_none());
        assert_eq!(status.writes, 0);
        assert!(status.healthy());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| NoteStore::generate_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
