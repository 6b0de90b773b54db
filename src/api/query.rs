//! Query string parsing for list endpoints
//!
//! Parameters are taken as raw strings so malformed values produce a JSON
//! 400 instead of the extractor's plain-text rejection.

use crate::notes::{NoteSearchRequest, SortKey};
use serde::Deserialize;
use uuid::Uuid;

/// Default page size for history and search
pub const DEFAULT_LIMIT: i64 = 100;

/// `GET /notes/{id}/history` parameters
#[derive(Debug, Default, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl HistoryParams {
    /// Parsed `(limit, offset)`. Range checks are left to the note manager.
    pub fn window(&self) -> Result<(i64, i64), String> {
        Ok((
            parse_i64(self.limit.as_deref(), "limit", DEFAULT_LIMIT)?,
            parse_i64(self.offset.as_deref(), "offset", 0)?,
        ))
    }
}

fn parse_i64(raw: Option<&str>, name: &str, default: i64) -> Result<i64, String> {
    match raw {
        Some(s) if !s.is_empty() => s
            .parse()
            .map_err(|_| format!("invalid {} value: {}", name, s)),
        _ => Ok(default),
    }
}

fn parse_bool(raw: Option<&str>, name: &str) -> Result<bool, String> {
    match raw {
        Some(s) if !s.is_empty() => s
            .parse()
            .map_err(|_| format!("invalid {} value: {}", name, s)),
        _ => Ok(false),
    }
}

/// Build a note search from `GET /notes` query pairs.
///
/// `tag` may be repeated; for other keys the last occurrence wins.
pub fn parse_note_search(pairs: &[(String, String)]) -> Result<NoteSearchRequest, String> {
    let last = |key: &str| {
        pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };
    let non_empty = |key: &str| last(key).filter(|v| !v.is_empty()).map(str::to_string);

    let channel = match last("channel") {
        Some(raw) if !raw.is_empty() => raw
            .parse::<Uuid>()
            .map_err(|_| format!("invalid channel value: {}", raw))?,
        _ => return Err("channel is required".to_string()),
    };

    let sort_key = match last("sortKey") {
        Some(raw) if !raw.is_empty() => raw.parse::<SortKey>()?,
        _ => SortKey::default(),
    };

    let tags = pairs
        .iter()
        .filter(|(k, v)| k == "tag" && !v.is_empty())
        .map(|(_, v)| v.clone())
        .collect();

    Ok(NoteSearchRequest {
        channel,
        include_child: parse_bool(last("includeChild"), "includeChild")?,
        title: non_empty("title"),
        body: non_empty("body"),
        tags,
        sort_key,
        limit: parse_i64(last("limit"), "limit", DEFAULT_LIMIT)?,
        offset: parse_i64(last("offset"), "offset", 0)?,
    })
}
