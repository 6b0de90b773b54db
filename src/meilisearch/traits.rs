//! Trait abstraction for Meilisearch search operations

use super::indexes::*;
use anyhow::Result;
use async_trait::async_trait;

/// Trait abstracting the search index.
///
/// Every public async method on `MeiliClient` (excluding `new` and
/// `init_indexes`) is represented here, so the note lifecycle can run
/// against the in-memory mock in tests.
#[async_trait]
pub trait SearchStore: Send + Sync {
    // ========================================================================
    // Note projections
    // ========================================================================

    /// Index a note projection, replacing any existing document with the same id
    async fn index_note(&self, doc: &NoteDocument) -> Result<()>;

    /// Fetch a note projection by id
    async fn get_note(&self, id: &str) -> Result<Option<NoteDocument>>;

    /// Delete a note projection by id (no-op when absent)
    async fn delete_note(&self, id: &str) -> Result<()>;

    /// Run a channel-filtered, sorted, windowed note query
    async fn search_notes(&self, query: &NoteIndexQuery) -> Result<NoteIndexPage>;

    // ========================================================================
    // Users
    // ========================================================================

    /// Index a user document
    async fn index_user(&self, doc: &UserDocument) -> Result<()>;

    /// List users (up to `limit`)
    async fn list_users(&self, limit: usize) -> Result<Vec<UserDocument>>;

    // ========================================================================
    // Health
    // ========================================================================

    /// Check connectivity to the index
    async fn health_check(&self) -> Result<bool>;
}
