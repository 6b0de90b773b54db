//! In-memory mock implementation of SearchStore for testing without a real Meilisearch instance.

use super::indexes::*;
use super::traits::SearchStore;
use crate::notes::SortKey;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// In-memory mock implementation of SearchStore for testing.
///
/// Documents live in `Vec`s behind async `RwLock`s, in insertion order.
/// Setting `fail_writes` makes every write return an error.
pub struct MockSearchStore {
    note_documents: RwLock<Vec<NoteDocument>>,
    user_documents: RwLock<Vec<UserDocument>>,
    pub fail_writes: AtomicBool,
}

impl MockSearchStore {
    /// Create a new empty mock store.
    pub fn new() -> Self {
        Self {
            note_documents: RwLock::new(Vec::new()),
            user_documents: RwLock::new(Vec::new()),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Number of note documents currently indexed
    pub async fn note_count(&self) -> usize {
        self.note_documents.read().await.len()
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(anyhow!("mock search index unavailable"))
        } else {
            Ok(())
        }
    }
}

impl Default for MockSearchStore {
    fn default() -> Self {
        Self::new()
    }
}

fn compare(a: &NoteDocument, b: &NoteDocument, sort: SortKey) -> std::cmp::Ordering {
    match sort {
        SortKey::DateAsc => a.updated_at.cmp(&b.updated_at),
        SortKey::DateDesc => b.updated_at.cmp(&a.updated_at),
        SortKey::TitleAsc => a.title.cmp(&b.title),
        SortKey::TitleDesc => b.title.cmp(&a.title),
    }
}

#[async_trait]
impl SearchStore for MockSearchStore {
    async fn index_note(&self, doc: &NoteDocument) -> Result<()> {
        self.check_writable()?;
        let mut docs = self.note_documents.write().await;
        if let Some(existing) = docs.iter_mut().find(|d| d.id == doc.id) {
            *existing = doc.clone();
        } else {
            docs.push(doc.clone());
        }
        Ok(())
    }

    async fn get_note(&self, id: &str) -> Result<Option<NoteDocument>> {
        let docs = self.note_documents.read().await;
        Ok(docs.iter().find(|d| d.id.to_string() == id).cloned())
    }

    async fn delete_note(&self, id: &str) -> Result<()> {
        self.check_writable()?;
        let mut docs = self.note_documents.write().await;
        docs.retain(|d| d.id.to_string() != id);
        Ok(())
    }

    async fn search_notes(&self, query: &NoteIndexQuery) -> Result<NoteIndexPage> {
        let docs = self.note_documents.read().await;
        let mut matched: Vec<NoteDocument> = docs
            .iter()
            .filter(|d| query.channels.contains(&d.channel))
            .cloned()
            .collect();
        matched.sort_by(|a, b| compare(a, b, query.sort));

        let total = matched.len();
        let hits = matched
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect();
        Ok(NoteIndexPage { hits, total })
    }

    async fn index_user(&self, doc: &UserDocument) -> Result<()> {
        self.check_writable()?;
        let mut docs = self.user_documents.write().await;
        if let Some(existing) = docs.iter_mut().find(|d| d.id == doc.id) {
            *existing = doc.clone();
        } else {
            docs.push(doc.clone());
        }
        Ok(())
    }

    async fn list_users(&self, limit: usize) -> Result<Vec<UserDocument>> {
        let docs = self.user_documents.read().await;
        Ok(docs.iter().take(limit).cloned().collect())
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(!self.fail_writes.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::test_note_document;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_index_note_overwrites_by_id() {
        let store = MockSearchStore::new();
        let mut doc = test_note_document("first", &[]);
        store.index_note(&doc).await.unwrap();
        doc.title = "second".to_string();
        store.index_note(&doc).await.unwrap();

        assert_eq!(store.note_count().await, 1);
        let fetched = store.get_note(&doc.id.to_string()).await.unwrap().unwrap();
        assert_eq!(fetched.title, "second");
    }

    #[tokio::test]
    async fn test_search_filters_channels_and_sorts() {
        let store = MockSearchStore::new();
        let channel = Uuid::now_v7();
        for title in ["b", "c", "a"] {
            let mut doc = test_note_document(title, &[]);
            doc.channel = channel;
            store.index_note(&doc).await.unwrap();
        }
        store
            .index_note(&test_note_document("other channel", &[]))
            .await
            .unwrap();

        let page = store
            .search_notes(&NoteIndexQuery {
                channels: vec![channel],
                sort: SortKey::TitleAsc,
                limit: 2,
                offset: 1,
            })
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        let titles: Vec<_> = page.hits.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "c"]);
    }

    #[tokio::test]
    async fn test_fail_writes() {
        let store = MockSearchStore::new();
        store.fail_writes.store(true, Ordering::SeqCst);
        assert!(store
            .index_note(&test_note_document("x", &[]))
            .await
            .is_err());
        assert!(!store.health_check().await.unwrap());
    }
}
