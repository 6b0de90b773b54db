//! Test helper factories and mock state builders
#![allow(dead_code)]

use crate::api::{ApiState, ServerState};
use crate::channels::mock::MockChannelDirectory;
use crate::meilisearch::indexes::NoteDocument;
use crate::meilisearch::mock::MockSearchStore;
use crate::notes::Permission;
use crate::postgres::mock::MockRevisionStore;
use crate::{AppState, Config};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

// ============================================================================
// Mock state builders
// ============================================================================

fn mock_config() -> Config {
    Config {
        server_port: 0,
        cors_origins: Vec::new(),
        database_url: "postgres://mock/notes".to_string(),
        postgres_max_connections: 1,
        meilisearch_url: "http://mock:7700".to_string(),
        meilisearch_key: "mock-key".to_string(),
        channel_api_url: "http://mock/api".to_string(),
        channel_api_token: None,
        channel_timeout_secs: 1,
        search_max_scan: 1000,
    }
}

/// Create a mock AppState with empty in-memory backends
pub fn mock_app_state() -> AppState {
    mock_app_state_with(
        Arc::new(MockSearchStore::new()),
        Arc::new(MockRevisionStore::new()),
        Arc::new(MockChannelDirectory::new()),
    )
}

/// Create a mock AppState over the given backends
pub fn mock_app_state_with(
    search: Arc<MockSearchStore>,
    revisions: Arc<MockRevisionStore>,
    channels: Arc<MockChannelDirectory>,
) -> AppState {
    AppState {
        search,
        revisions,
        channels,
        config: Arc::new(mock_config()),
    }
}

/// API state over empty in-memory backends
pub fn mock_server_state() -> ApiState {
    Arc::new(ServerState::new(&mock_app_state()))
}

/// API state over the given backends
pub fn mock_server_state_with(
    search: Arc<MockSearchStore>,
    revisions: Arc<MockRevisionStore>,
    channels: Arc<MockChannelDirectory>,
) -> ApiState {
    Arc::new(ServerState::new(&mock_app_state_with(
        search, revisions, channels,
    )))
}

// ============================================================================
// Documents
// ============================================================================

/// Note projection in a fresh channel
pub fn test_note_document(title: &str, tags: &[&str]) -> NoteDocument {
    let now = Utc::now();
    NoteDocument {
        id: Uuid::now_v7(),
        latest_revision: Uuid::now_v7(),
        channel: Uuid::now_v7(),
        permission: Permission::Limited,
        title: title.to_string(),
        summary: String::new(),
        body: format!("{}\n", title),
        tag: tags.iter().map(|t| t.to_string()).collect(),
        created_at: now,
        updated_at: now,
    }
}
