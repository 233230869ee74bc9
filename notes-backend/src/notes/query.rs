//! List query normalization, filtering and pagination.

use notes_types::{Note, Pagination};

/// Query-string parameters exactly as the client sent them
#[derive(Debug, Default)]
pub struct RawListQuery {
    pub q: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl RawListQuery {
    /// Pick the known keys out of decoded query pairs. A key sent more than
    /// once is ambiguous and counts as absent.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let single = |key: &str| {
            let mut values = pairs.iter().filter(|(k, _)| k == key).map(|(_, v)| v);
            match (values.next(), values.next()) {
                (Some(value), None) => Some(value.clone()),
                _ => None,
            }
        };
        Self {
            q: single("q"),
            limit: single("limit"),
            offset: single("offset"),
        }
    }
}

/// Normalized list parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub q: Option<String>,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl ListQuery {
    /// Lenient parsing: malformed counts are treated as absent and negative
    /// ones as zero. Never fails.
    pub fn from_raw(raw: &RawListQuery) -> Self {
        Self {
            q: raw.q.clone(),
            limit: parse_count(raw.limit.as_deref()),
            offset: parse_count(raw.offset.as_deref()).unwrap_or(0),
        }
    }

    /// Lowercased search needle, or `None` when `q` is blank
    pub fn needle(&self) -> Option<String> {
        self.q
            .as_deref()
            .filter(|q| !q.trim().is_empty())
            .map(str::to_lowercase)
    }
}

/// Counts are read as decimal floats rather than integer prefixes, so `"1e3"`
/// is 1000, while `"12abc"` and `"0x10"` are absent where integer-prefix
/// parsing would give 12 and 0.
fn parse_count(raw: Option<&str>) -> Option<usize> {
    let value: f64 = raw?.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    if value <= 0.0 {
        return Some(0);
    }
    Some(value.trunc() as usize)
}

/// One page of a list result
#[derive(Debug, Clone)]
pub struct NotePage {
    pub notes: Vec<Note>,
    pub pagination: Pagination,
}

/// Sort by `updated_at` descending (stable, so ties keep insertion order),
/// filter by the needle, then slice out the requested page.
pub fn apply(notes: &[Note], query: &ListQuery) -> NotePage {
    let mut matched: Vec<&Note> = notes.iter().collect();
    matched.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

    if let Some(needle) = query.needle() {
        matched.retain(|note| note.matches(&needle));
    }

    let total = matched.len();
    let page = matched
        .into_iter()
        .skip(query.offset)
        .take(query.limit.unwrap_or(usize::MAX))
        .cloned()
        .collect();

    NotePage {
        notes: page,
        pagination: Pagination {
            total,
            limit: query.limit,
            offset: query.offset,
        },
    }
}
