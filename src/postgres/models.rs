//! Row models for the revision store

use crate::notes::Permission;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pointer row for a note (`notes` table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct NoteRecord {
    pub id: Uuid,
    pub latest_revision: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl NoteRecord {
    /// Whether the note has been soft-deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Immutable revision row (`note_revisions` table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionRecord {
    pub note_id: Uuid,
    pub revision_id: Uuid,
    pub channel: Uuid,
    pub permission: Permission,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub tags: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

/// Raw `note_revisions` row; permission is stored as text
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct RevisionRow {
    pub note_id: Uuid,
    pub revision_id: Uuid,
    pub channel: Uuid,
    pub permission: String,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub tags: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<RevisionRow> for RevisionRecord {
    type Error = anyhow::Error;

    fn try_from(row: RevisionRow) -> Result<Self, Self::Error> {
        let permission = row
            .permission
            .parse::<Permission>()
            .map_err(anyhow::Error::msg)?;
        Ok(Self {
            note_id: row.note_id,
            revision_id: row.revision_id,
            channel: row.channel,
            permission,
            title: row.title,
            summary: row.summary,
            body: row.body,
            tags: row.tags,
            updated_at: row.updated_at,
        })
    }
}
