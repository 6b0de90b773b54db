//! Metadata derivation from note bodies
//!
//! Title, summary and tags are never edited directly once a note has a body:
//! they are recomputed from the body text on every update.

/// Title used when a note has no body yet
pub const DEFAULT_TITLE: &str = "New note";

/// Summary shown on a freshly created note
pub const DEFAULT_SUMMARY: &str = "A newly created note";

/// Maximum summary length, in characters (not bytes)
pub const SUMMARY_MAX_CHARS: usize = 100;

/// Appended to a truncated summary
pub const ELLIPSIS: &str = "...";

/// Derived metadata for a body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteMetadata {
    pub title: String,
    pub summary: String,
    pub tags: Vec<String>,
}

impl NoteMetadata {
    /// Derive all three fields at once
    pub fn from_body(body: &str) -> Self {
        Self {
            title: derive_title(body),
            summary: derive_summary(body),
            tags: derive_tags(body),
        }
    }
}

/// First line of the body, trimmed. Empty body gives [`DEFAULT_TITLE`].
pub fn derive_title(body: &str) -> String {
    if body.is_empty() {
        return DEFAULT_TITLE.to_string();
    }
    body.split('\n').next().unwrap_or_default().trim().to_string()
}

/// First [`SUMMARY_MAX_CHARS`] characters of the body, with [`ELLIPSIS`]
/// appended when the body is longer.
pub fn derive_summary(body: &str) -> String {
    match body.char_indices().nth(SUMMARY_MAX_CHARS) {
        Some((cut, _)) => format!("{}{}", &body[..cut], ELLIPSIS),
        None => body.to_string(),
    }
}

/// Every whitespace-separated `#word` token, without the `#`, in order.
///
/// Duplicates are kept: `"#a #b #a"` yields `["a", "b", "a"]`.
pub fn derive_tags(body: &str) -> Vec<String> {
    body.split_whitespace()
        .filter_map(|word| word.strip_prefix('#'))
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
