//! Index definitions for Meilisearch

use crate::notes::{Permission, SortKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Note projection document (one per note, overwritten on update)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteDocument {
    pub id: Uuid,
    pub latest_revision: Uuid,
    pub channel: Uuid,
    pub permission: Permission,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub tag: Vec<String>,
    /// Unix milliseconds in the index so the field is sortable
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

/// User document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDocument {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Index-side part of a note search: channel filter, order and window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteIndexQuery {
    /// Notes in any of these channels match
    pub channels: Vec<Uuid>,
    pub sort: SortKey,
    pub limit: usize,
    pub offset: usize,
}

impl NoteIndexQuery {
    /// Filter expression for the channel set
    pub fn channel_filter(&self) -> String {
        let ids: Vec<String> = self
            .channels
            .iter()
            .map(|id| format!("\"{}\"", id))
            .collect();
        format!("channel IN [{}]", ids.join(", "))
    }
}

/// Hits for a note query
#[derive(Debug, Clone, Default)]
pub struct NoteIndexPage {
    pub hits: Vec<NoteDocument>,
    /// Matches across all pages, as reported by the index
    pub total: usize,
}

/// Index names
pub mod index_names {
    pub const NOTES: &str = "notes";
    pub const USERS: &str = "users";
}
