//! RevisionStore trait definition
//!
//! Defines the abstract interface for the relational side of the note
//! lifecycle. `PgClient` implements it against PostgreSQL; tests use the
//! in-memory mock.

use super::models::{NoteRecord, RevisionRecord};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Abstract interface for the append-only revision log and note pointers.
#[async_trait]
pub trait RevisionStore: Send + Sync {
    // ========================================================================
    // Notes and revisions
    // ========================================================================

    /// Insert a note pointer row together with its first revision
    async fn create_note(&self, note: &NoteRecord, first: &RevisionRecord) -> Result<()>;

    /// Get a note pointer row by id, including soft-deleted ones
    async fn get_note(&self, id: Uuid) -> Result<Option<NoteRecord>>;

    /// Point the note at `revision` and append the revision row
    async fn append_revision(&self, revision: &RevisionRecord) -> Result<()>;

    /// Set the soft-delete marker. Returns false if the note does not exist
    /// or is already deleted.
    async fn soft_delete_note(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool>;

    /// Revisions of a note, newest first
    async fn list_revisions(
        &self,
        note_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RevisionRecord>>;

    /// Get a single revision by id
    async fn get_revision(&self, revision_id: Uuid) -> Result<Option<RevisionRecord>>;

    // ========================================================================
    // User settings
    // ========================================================================

    /// Default channel preference of a user
    async fn get_default_channel(&self, user_name: &str) -> Result<Option<Uuid>>;

    /// Store the default channel preference of a user
    async fn set_default_channel(&self, user_name: &str, channel: Uuid) -> Result<()>;

    // ========================================================================
    // Health
    // ========================================================================

    /// Check connectivity to the database
    async fn health_check(&self) -> Result<bool>;
}
