//! Shared wire types for the notes backend and its HTTP clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =====================================================
// Domain Types
// =====================================================

/// A single note, as stored on disk and returned over the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Case-insensitive substring match against title or content.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.content.to_lowercase().contains(needle)
    }
}

/// Pagination metadata attached to list responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Count after filtering, before limit/offset
    pub total: usize,
    /// `null` when the caller did not ask for a limit
    pub limit: Option<usize>,
    pub offset: usize,
}

// =====================================================
// Response Envelope
// =====================================================

/// `success` for 2xx, `fail` for client errors, `error` for server errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Fail,
    Error,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            data: Some(data),
            pagination: None,
            message: None,
        }
    }

    pub fn page(data: T, pagination: Pagination) -> Self {
        Self {
            status: ResponseStatus::Success,
            data: Some(data),
            pagination: Some(pagination),
            message: None,
        }
    }

    pub fn fail(msg: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Fail,
            data: None,
            pagination: None,
            message: Some(msg.into()),
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            data: None,
            pagination: None,
            message: Some(msg.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Note {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        Note {
            id: "n1".to_string(),
            title: "Grocery List".to_string(),
            content: "Milk and EGGS".to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_note_uses_camel_case_fields() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["createdAt"], "2024-05-01T12:00:00Z");
        assert_eq!(json["updatedAt"], "2024-05-01T12:00:00Z");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_note_matches_title_or_content() {
        let note = sample();
        assert!(note.matches("grocery"));
        assert!(note.matches("eggs"));
        assert!(!note.matches("bread"));
    }

    #[test]
    fn test_envelope_omits_empty_fields() {
        let json = serde_json::to_value(ApiResponse::<()>::fail("Note not found")).unwrap();
        assert_eq!(json["status"], "fail");
        assert_eq!(json["message"], "Note not found");
        assert!(json.get("data").is_none());
        assert!(json.get("pagination").is_none());
    }

    #[test]
    fn test_page_serializes_null_limit() {
        let resp = ApiResponse::page(
            Vec::<Note>::new(),
            Pagination { total: 0, limit: None, offset: 0 },
        );
        let json = serde_json::to_value(resp).unwrap();
        assert_eq!(json["status"], "success");
        assert!(json["pagination"]["limit"].is_null());
        assert_eq!(json["pagination"]["offset"], 0);
    }
}
