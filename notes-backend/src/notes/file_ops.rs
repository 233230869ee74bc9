//! File operations for the notes persistence document
//!
//! The whole collection lives in one pretty-printed JSON array that is
//! rewritten on every mutation.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use notes_types::Note;

use super::error::StoreError;

/// Read the notes file. `Ok(None)` means the file does not exist yet.
pub fn read_notes_file(path: &Path) -> Result<Option<Vec<Note>>, StoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let notes: Vec<Note> = serde_json::from_str(&raw)?;
    Ok(Some(notes))
}

/// Overwrite the notes file with the full collection (creates parent directories as needed)
pub fn write_notes_file(path: &Path, notes: &[Note]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(notes)?;
    let mut file = fs::File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
