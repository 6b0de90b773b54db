//! RevisionStore trait implementation for PgClient
//!
//! Each trait method delegates directly to the corresponding inherent method
//! on `PgClient`.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::client::PgClient;
use super::models::{NoteRecord, RevisionRecord};
use super::traits::RevisionStore;

#[async_trait]
impl RevisionStore for PgClient {
    async fn create_note(&self, note: &NoteRecord, first: &RevisionRecord) -> Result<()> {
        self.create_note(note, first).await
    }

    async fn get_note(&self, id: Uuid) -> Result<Option<NoteRecord>> {
        self.get_note(id).await
    }

    async fn append_revision(&self, revision: &RevisionRecord) -> Result<()> {
        self.append_revision(revision).await
    }

    async fn soft_delete_note(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool> {
        self.soft_delete_note(id, at).await
    }

    async fn list_revisions(
        &self,
        note_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RevisionRecord>> {
        self.list_revisions(note_id, limit, offset).await
    }

    async fn get_revision(&self, revision_id: Uuid) -> Result<Option<RevisionRecord>> {
        self.get_revision(revision_id).await
    }

    async fn get_default_channel(&self, user_name: &str) -> Result<Option<Uuid>> {
        self.get_default_channel(user_name).await
    }

    async fn set_default_channel(&self, user_name: &str, channel: Uuid) -> Result<()> {
        self.set_default_channel(user_name, channel).await
    }

    async fn health_check(&self) -> Result<bool> {
        self.health_check().await
    }
}
