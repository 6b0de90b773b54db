//! SearchStore trait implementation for MeiliClient
//!
//! Each trait method delegates directly to the corresponding inherent method
//! on `MeiliClient`.

use anyhow::Result;
use async_trait::async_trait;

use super::client::MeiliClient;
use super::indexes::{NoteDocument, NoteIndexPage, NoteIndexQuery, UserDocument};
use super::traits::SearchStore;

#[async_trait]
impl SearchStore for MeiliClient {
    async fn index_note(&self, doc: &NoteDocument) -> Result<()> {
        self.index_note(doc).await
    }

    async fn get_note(&self, id: &str) -> Result<Option<NoteDocument>> {
        self.get_note(id).await
    }

    async fn delete_note(&self, id: &str) -> Result<()> {
        self.delete_note(id).await
    }

    async fn search_notes(&self, query: &NoteIndexQuery) -> Result<NoteIndexPage> {
        self.search_notes(query).await
    }

    async fn index_user(&self, doc: &UserDocument) -> Result<()> {
        self.index_user(doc).await
    }

    async fn list_users(&self, limit: usize) -> Result<Vec<UserDocument>> {
        self.list_users(limit).await
    }

    async fn health_check(&self) -> Result<bool> {
        self.health_check().await
    }
}
