//! Error types for the notes system.

use thiserror::Error;

/// Errors surfaced to callers of the note service and the HTTP boundary.
#[derive(Debug, Error)]
pub enum NoteError {
    /// A request body failed boundary validation. Never reaches the store.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The target id does not exist in the collection.
    #[error("Note not found: {0}")]
    NotFound(String),
}

impl NoteError {
    /// Message safe to hand back to an API client.
    pub fn client_message(&self) -> String {
        match self {
            Self::Validation(msg) => format!("Validation error: {}", msg),
            Self::NotFound(_) => "Note not found".to_string(),
        }
    }
}

/// Failures reading or writing the persistence file.
///
/// These stay inside the store: they are logged and recorded in the
/// persistence status, never returned from a service call.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
