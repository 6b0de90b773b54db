//! In-memory mock implementation of RevisionStore for testing without PostgreSQL.

use super::models::{NoteRecord, RevisionRecord};
use super::traits::RevisionStore;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory mock implementation of RevisionStore.
///
/// `fail_writes` makes every write fail, to reproduce a relational outage
/// after the search index has already been written. `calls` counts every
/// trait call.
pub struct MockRevisionStore {
    notes: RwLock<HashMap<Uuid, NoteRecord>>,
    revisions: RwLock<Vec<RevisionRecord>>,
    settings: RwLock<HashMap<String, Uuid>>,
    pub fail_writes: AtomicBool,
    pub calls: AtomicUsize,
}

impl MockRevisionStore {
    pub fn new() -> Self {
        Self {
            notes: RwLock::new(HashMap::new()),
            revisions: RwLock::new(Vec::new()),
            settings: RwLock::new(HashMap::new()),
            fail_writes: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of revision rows stored for a note
    pub async fn revision_count(&self, note_id: Uuid) -> usize {
        self.revisions
            .read()
            .await
            .iter()
            .filter(|r| r.note_id == note_id)
            .count()
    }

    fn track(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(anyhow!("mock revision store unavailable"))
        } else {
            Ok(())
        }
    }
}

impl Default for MockRevisionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevisionStore for MockRevisionStore {
    async fn create_note(&self, note: &NoteRecord, first: &RevisionRecord) -> Result<()> {
        self.track();
        self.check_writable()?;
        let mut notes = self.notes.write().await;
        if notes.contains_key(&note.id) {
            return Err(anyhow!("duplicate key: note {}", note.id));
        }
        notes.insert(note.id, note.clone());
        self.revisions.write().await.push(first.clone());
        Ok(())
    }

    async fn get_note(&self, id: Uuid) -> Result<Option<NoteRecord>> {
        self.track();
        Ok(self.notes.read().await.get(&id).cloned())
    }

    async fn append_revision(&self, revision: &RevisionRecord) -> Result<()> {
        self.track();
        self.check_writable()?;
        let mut notes = self.notes.write().await;
        if let Some(note) = notes.get_mut(&revision.note_id) {
            note.latest_revision = revision.revision_id;
            note.updated_at = revision.updated_at;
        } else {
            // Mirrors the foreign key on note_revisions.note_id
            return Err(anyhow!("foreign key violation: note {}", revision.note_id));
        }
        self.revisions.write().await.push(revision.clone());
        Ok(())
    }

    async fn soft_delete_note(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool> {
        self.track();
        self.check_writable()?;
        let mut notes = self.notes.write().await;
        match notes.get_mut(&id) {
            Some(note) if !note.is_deleted() => {
                note.deleted_at = Some(at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn list_revisions(
        &self,
        note_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RevisionRecord>> {
        self.track();
        let revisions = self.revisions.read().await;
        let mut matched: Vec<RevisionRecord> = revisions
            .iter()
            .filter(|r| r.note_id == note_id)
            .cloned()
            .collect();
        matched.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| b.revision_id.cmp(&a.revision_id))
        });
        Ok(matched
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn get_revision(&self, revision_id: Uuid) -> Result<Option<RevisionRecord>> {
        self.track();
        let revisions = self.revisions.read().await;
        Ok(revisions
            .iter()
            .find(|r| r.revision_id == revision_id)
            .cloned())
    }

    async fn get_default_channel(&self, user_name: &str) -> Result<Option<Uuid>> {
        self.track();
        Ok(self.settings.read().await.get(user_name).copied())
    }

    async fn set_default_channel(&self, user_name: &str, channel: Uuid) -> Result<()> {
        self.track();
        self.check_writable()?;
        self.settings
            .write()
            .await
            .insert(user_name.to_string(), channel);
        Ok(())
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(!self.fail_writes.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::Permission;
    use chrono::Duration;

    fn note(id: Uuid, revision: Uuid) -> NoteRecord {
        let now = Utc::now();
        NoteRecord {
            id,
            latest_revision: revision,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn revision(note_id: Uuid, at: DateTime<Utc>) -> RevisionRecord {
        RevisionRecord {
            note_id,
            revision_id: Uuid::now_v7(),
            channel: Uuid::nil(),
            permission: Permission::Limited,
            title: "t".into(),
            summary: "s".into(),
            body: "b".into(),
            tags: Vec::new(),
            updated_at: at,
        }
    }

    #[tokio::test]
    async fn test_append_moves_pointer() {
        let store = MockRevisionStore::new();
        let id = Uuid::now_v7();
        let first = revision(id, Utc::now());
        store.create_note(&note(id, first.revision_id), &first).await.unwrap();

        let second = revision(id, Utc::now() + Duration::seconds(1));
        store.append_revision(&second).await.unwrap();

        let pointer = store.get_note(id).await.unwrap().unwrap();
        assert_eq!(pointer.latest_revision, second.revision_id);
        assert_eq!(store.revision_count(id).await, 2);
    }

    #[tokio::test]
    async fn test_append_to_missing_note_fails() {
        let store = MockRevisionStore::new();
        assert!(store
            .append_revision(&revision(Uuid::now_v7(), Utc::now()))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_list_revisions_newest_first() {
        let store = MockRevisionStore::new();
        let id = Uuid::now_v7();
        let base = Utc::now();
        let first = revision(id, base);
        store.create_note(&note(id, first.revision_id), &first).await.unwrap();
        for secs in [2, 1] {
            store
                .append_revision(&revision(id, base + Duration::seconds(secs)))
                .await
                .unwrap();
        }

        let page = store.list_revisions(id, 2, 0).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].updated_at, base + Duration::seconds(2));
        assert_eq!(page[1].updated_at, base + Duration::seconds(1));

        let rest = store.list_revisions(id, 10, 2).await.unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].revision_id, first.revision_id);
    }

    #[tokio::test]
    async fn test_soft_delete_and_settings() {
        let store = MockRevisionStore::new();
        assert!(!store.soft_delete_note(Uuid::now_v7(), Utc::now()).await.unwrap());

        let channel = Uuid::now_v7();
        store.set_default_channel("alice", channel).await.unwrap();
        assert_eq!(
            store.get_default_channel("alice").await.unwrap(),
            Some(channel)
        );
        assert_eq!(store.get_default_channel("bob").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_fail_writes() {
        let store = MockRevisionStore::new();
        store.fail_writes.store(true, Ordering::SeqCst);
        let id = Uuid::now_v7();
        let first = revision(id, Utc::now());
        assert!(store.create_note(&note(id, first.revision_id), &first).await.is_err());
        assert!(!store.health_check().await.unwrap());
    }
}
