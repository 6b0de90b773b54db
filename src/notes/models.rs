//! Note models and DTOs
//!
//! The search index holds one projection per note (`NoteDocument`), the
//! revision store holds the pointer row and the append-only revision log.
//! The types here are what the lifecycle service exchanges with callers.

use crate::meilisearch::indexes::NoteDocument;
use crate::postgres::RevisionRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Core Enums
// ============================================================================

/// Who may see or edit a note
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Readable by channel members, editable by the author
    #[default]
    Limited,
    /// Editable by anyone who can read it
    Editable,
    /// Only visible to the author
    Private,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limited => write!(f, "limited"),
            Self::Editable => write!(f, "editable"),
            Self::Private => write!(f, "private"),
        }
    }
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "limited" => Ok(Self::Limited),
            "editable" => Ok(Self::Editable),
            "private" => Ok(Self::Private),
            _ => Err(format!("Unknown permission: {}", s)),
        }
    }
}

/// Ordering applied to note search results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    DateAsc,
    #[default]
    DateDesc,
    TitleAsc,
    TitleDesc,
}

impl SortKey {
    /// Sort expression understood by the search index
    pub fn as_index_sort(&self) -> &'static str {
        match self {
            Self::DateAsc => "updated_at:asc",
            Self::DateDesc => "updated_at:desc",
            Self::TitleAsc => "title:asc",
            Self::TitleDesc => "title:desc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DateAsc => write!(f, "dateAsc"),
            Self::DateDesc => write!(f, "dateDesc"),
            Self::TitleAsc => write!(f, "titleAsc"),
            Self::TitleDesc => write!(f, "titleDesc"),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dateAsc" => Ok(Self::DateAsc),
            "dateDesc" => Ok(Self::DateDesc),
            "titleAsc" => Ok(Self::TitleAsc),
            "titleDesc" => Ok(Self::TitleDesc),
            _ => Err(format!("invalid sortKey value: {}", s)),
        }
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Optional body of a note creation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    pub channel: Option<Uuid>,
}

/// Content submitted for a note update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNoteRequest {
    pub channel: Uuid,
    pub permission: Permission,
    /// Revision the caller based its edit on
    pub revision: Uuid,
    #[serde(default)]
    pub body: String,
    pub tags: Option<Vec<String>>,
    pub title: Option<String>,
    pub summary: Option<String>,
}

/// Filters for listing notes through the search index
#[derive(Debug, Clone, Default)]
pub struct NoteSearchRequest {
    pub channel: Uuid,
    pub include_child: bool,
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Vec<String>,
    pub sort_key: SortKey,
    pub limit: i64,
    pub offset: i64,
}

// ============================================================================
// Responses
// ============================================================================

/// Identity of a freshly created note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedNote {
    pub id: Uuid,
    pub channel: Uuid,
    pub permission: Permission,
    pub revision: Uuid,
}

/// Current state of a note, as served from the search index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteView {
    pub id: Uuid,
    pub revision: Uuid,
    pub channel: Uuid,
    pub permission: Permission,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub tag: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<NoteDocument> for NoteView {
    fn from(doc: NoteDocument) -> Self {
        Self {
            id: doc.id,
            revision: doc.latest_revision,
            channel: doc.channel,
            permission: doc.permission,
            title: doc.title,
            summary: doc.summary,
            body: doc.body,
            tag: doc.tag,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

/// Note entry in a search result (body omitted)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteSummary {
    pub id: Uuid,
    pub channel: Uuid,
    pub permission: Permission,
    pub title: String,
    pub summary: String,
    pub tag: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<NoteDocument> for NoteSummary {
    fn from(doc: NoteDocument) -> Self {
        Self {
            id: doc.id,
            channel: doc.channel,
            permission: doc.permission,
            title: doc.title,
            summary: doc.summary,
            tag: doc.tag,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

/// One page of note search results
#[derive(Debug, Clone, Serialize)]
pub struct NoteSearchPage {
    /// Number of notes matching the filters (not just this page)
    pub total: usize,
    pub notes: Vec<NoteSummary>,
}

/// Historical revision of a note
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevisionView {
    pub revision: Uuid,
    pub channel: Uuid,
    pub permission: Permission,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub tag: Vec<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<RevisionRecord> for RevisionView {
    fn from(rev: RevisionRecord) -> Self {
        Self {
            revision: rev.revision_id,
            channel: rev.channel,
            permission: rev.permission,
            title: rev.title,
            summary: rev.summary,
            body: rev.body,
            tag: rev.tags,
            updated_at: rev.updated_at,
        }
    }
}

/// One page of revision history
#[derive(Debug, Clone, Serialize)]
pub struct HistoryPage {
    /// Number of revisions in this page
    pub total: usize,
    pub notes: Vec<RevisionView>,
}
