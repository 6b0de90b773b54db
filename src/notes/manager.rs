//! Note Manager - lifecycle operations across the search index and revision store
//!
//! Every mutation writes the search index first and the revision store second.
//! A failure between the two is not compensated: the projection keeps the new
//! content while the revision log does not, and `repair_note` can rebuild the
//! projection from the revision store on request.

use super::derive::{NoteMetadata, DEFAULT_SUMMARY, DEFAULT_TITLE};
use super::error::{NoteError, NoteResult};
use super::models::*;
use super::query::PatternFilter;
use crate::channels::{collect_descendants, ChannelDirectory};
use crate::meilisearch::indexes::{NoteDocument, NoteIndexQuery};
use crate::meilisearch::SearchStore;
use crate::postgres::{NoteRecord, RevisionRecord, RevisionStore};
use anyhow::anyhow;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Default number of candidates scanned when a search uses patterns.
pub const DEFAULT_MAX_SCAN: usize = 1000;

/// Manager for the note lifecycle
pub struct NoteManager {
    search: Arc<dyn SearchStore>,
    revisions: Arc<dyn RevisionStore>,
    channels: Arc<dyn ChannelDirectory>,
    max_scan: usize,
}

impl NoteManager {
    /// Create a new NoteManager
    pub fn new(
        search: Arc<dyn SearchStore>,
        revisions: Arc<dyn RevisionStore>,
        channels: Arc<dyn ChannelDirectory>,
    ) -> Self {
        Self {
            search,
            revisions,
            channels,
            max_scan: DEFAULT_MAX_SCAN,
        }
    }

    /// Set how many candidates a pattern search may scan (builder pattern).
    pub fn with_max_scan(mut self, max_scan: usize) -> Self {
        self.max_scan = max_scan.max(1);
        self
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Create an empty note. A missing channel leaves the note unassigned
    /// (nil channel id).
    pub async fn create_note(&self, channel: Option<Uuid>) -> NoteResult<CreatedNote> {
        let note_id = Uuid::now_v7();
        let revision_id = Uuid::now_v7();
        let channel = channel.unwrap_or_else(Uuid::nil);
        let permission = Permission::default();
        let now = Utc::now();

        let doc = NoteDocument {
            id: note_id,
            latest_revision: revision_id,
            channel,
            permission,
            title: DEFAULT_TITLE.to_string(),
            summary: DEFAULT_SUMMARY.to_string(),
            body: String::new(),
            tag: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.search.index_note(&doc).await?;

        let note = NoteRecord {
            id: note_id,
            latest_revision: revision_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let first = RevisionRecord {
            note_id,
            revision_id,
            channel,
            permission,
            title: doc.title.clone(),
            summary: doc.summary.clone(),
            body: String::new(),
            tags: Vec::new(),
            updated_at: now,
        };
        if let Err(e) = self.revisions.create_note(&note, &first).await {
            tracing::warn!(
                note_id = %note_id,
                error = %e,
                "Note indexed but not stored in the revision store"
            );
            return Err(e.into());
        }

        tracing::info!(note_id = %note_id, channel = %channel, "Created note");
        Ok(CreatedNote {
            id: note_id,
            channel,
            permission,
            revision: revision_id,
        })
    }

    /// Write a new revision of a note.
    ///
    /// A non-empty body determines title, summary and tags. With an empty body
    /// the caller's values are kept, falling back to the empty-body defaults.
    pub async fn update_note(&self, id: Uuid, req: UpdateNoteRequest) -> NoteResult<()> {
        let metadata = if req.body.is_empty() {
            let defaults = NoteMetadata::from_body("");
            NoteMetadata {
                title: req.title.unwrap_or(defaults.title),
                summary: req.summary.unwrap_or(defaults.summary),
                tags: req.tags.unwrap_or(defaults.tags),
            }
        } else {
            NoteMetadata::from_body(&req.body)
        };

        let revision_id = Uuid::now_v7();
        let now = Utc::now();
        let created_at = self
            .search
            .get_note(&id.to_string())
            .await?
            .map(|existing| existing.created_at)
            .unwrap_or(now);

        let doc = NoteDocument {
            id,
            latest_revision: revision_id,
            channel: req.channel,
            permission: req.permission,
            title: metadata.title,
            summary: metadata.summary,
            body: req.body,
            tag: metadata.tags,
            created_at,
            updated_at: now,
        };
        self.search.index_note(&doc).await?;

        let pointer = match self.revisions.get_note(id).await {
            Ok(Some(note)) if !note.is_deleted() => note,
            Ok(_) => {
                tracing::warn!(note_id = %id, "Projection written for a missing or deleted note");
                return Err(NoteError::NoteNotFound(id));
            }
            Err(e) => {
                tracing::warn!(note_id = %id, error = %e, "Note indexed but pointer lookup failed");
                return Err(e.into());
            }
        };
        if pointer.latest_revision != req.revision {
            tracing::warn!(
                note_id = %id,
                base = %req.revision,
                latest = %pointer.latest_revision,
                "Update based on a stale revision, overwriting"
            );
        }

        let revision = RevisionRecord {
            note_id: id,
            revision_id,
            channel: doc.channel,
            permission: doc.permission,
            title: doc.title,
            summary: doc.summary,
            body: doc.body,
            tags: doc.tag,
            updated_at: now,
        };
        if let Err(e) = self.revisions.append_revision(&revision).await {
            tracing::warn!(
                note_id = %id,
                revision = %revision_id,
                error = %e,
                "Note indexed but revision not appended"
            );
            return Err(e.into());
        }

        tracing::debug!(note_id = %id, revision = %revision_id, "Updated note");
        Ok(())
    }

    /// Remove the projection and soft-delete the note
    pub async fn delete_note(&self, id: Uuid) -> NoteResult<()> {
        self.search.delete_note(&id.to_string()).await?;

        let deleted = match self.revisions.soft_delete_note(id, Utc::now()).await {
            Ok(deleted) => deleted,
            Err(e) => {
                tracing::warn!(note_id = %id, error = %e, "Projection removed but note not soft-deleted");
                return Err(e.into());
            }
        };
        if !deleted {
            return Err(NoteError::NoteNotFound(id));
        }

        tracing::info!(note_id = %id, "Deleted note");
        Ok(())
    }

    /// Rebuild the projection of a note from the revision store.
    ///
    /// Soft-deleted notes lose their projection. Tags come from the latest
    /// revision, so caller-supplied tags of an empty-body update survive.
    pub async fn repair_note(&self, id: Uuid) -> NoteResult<()> {
        let pointer = self
            .revisions
            .get_note(id)
            .await?
            .ok_or(NoteError::NoteNotFound(id))?;

        if pointer.is_deleted() {
            self.search.delete_note(&id.to_string()).await?;
            tracing::info!(note_id = %id, "Removed projection of deleted note");
            return Ok(());
        }

        let latest = self
            .revisions
            .get_revision(pointer.latest_revision)
            .await?
            .ok_or_else(|| {
                anyhow!(
                    "latest revision {} of note {} is missing",
                    pointer.latest_revision,
                    id
                )
            })?;

        let doc = NoteDocument {
            id,
            latest_revision: latest.revision_id,
            channel: latest.channel,
            permission: latest.permission,
            title: latest.title,
            summary: latest.summary,
            body: latest.body,
            tag: latest.tags,
            created_at: pointer.created_at,
            updated_at: latest.updated_at,
        };
        self.search.index_note(&doc).await?;

        tracing::info!(note_id = %id, revision = %doc.latest_revision, "Repaired note projection");
        Ok(())
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Current state of a note, from the search index
    pub async fn get_note(&self, id: Uuid) -> NoteResult<NoteView> {
        self.search
            .get_note(&id.to_string())
            .await?
            .map(NoteView::from)
            .ok_or(NoteError::NoteNotFound(id))
    }

    /// Revisions of a note, newest first
    pub async fn get_history(&self, id: Uuid, limit: i64, offset: i64) -> NoteResult<HistoryPage> {
        validate_window(limit, offset)?;

        match self.revisions.get_note(id).await? {
            Some(note) if !note.is_deleted() => {}
            _ => return Err(NoteError::NoteNotFound(id)),
        }

        let revisions = self.revisions.list_revisions(id, limit, offset).await?;
        if revisions.is_empty() {
            return Err(NoteError::EmptyPage(id));
        }

        Ok(HistoryPage {
            total: revisions.len(),
            notes: revisions.into_iter().map(RevisionView::from).collect(),
        })
    }

    /// Search notes of a channel (optionally with its descendants)
    pub async fn search_notes(&self, req: &NoteSearchRequest) -> NoteResult<NoteSearchPage> {
        validate_window(req.limit, req.offset)?;
        let filter = PatternFilter::new(req.title.as_deref(), req.body.as_deref(), &req.tags)
            .map_err(NoteError::Validation)?;

        let mut channels = vec![req.channel];
        if req.include_child {
            channels.extend(collect_descendants(self.channels.as_ref(), req.channel).await?);
        }

        let limit = req.limit as usize;
        let offset = req.offset as usize;

        if !filter.is_active() {
            let page = self
                .search
                .search_notes(&NoteIndexQuery {
                    channels,
                    sort: req.sort_key,
                    limit,
                    offset,
                })
                .await?;
            return Ok(NoteSearchPage {
                total: page.total,
                notes: page.hits.into_iter().map(NoteSummary::from).collect(),
            });
        }

        let candidates = self
            .search
            .search_notes(&NoteIndexQuery {
                channels,
                sort: req.sort_key,
                limit: self.max_scan,
                offset: 0,
            })
            .await?;
        if candidates.total > self.max_scan {
            tracing::debug!(
                channel = %req.channel,
                total = candidates.total,
                max_scan = self.max_scan,
                "Pattern search truncated to the scan limit"
            );
        }

        let matched: Vec<NoteDocument> = candidates
            .hits
            .into_iter()
            .filter(|doc| filter.matches(doc))
            .collect();
        let total = matched.len();
        let notes = matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(NoteSummary::from)
            .collect();

        Ok(NoteSearchPage { total, notes })
    }
}

fn validate_window(limit: i64, offset: i64) -> NoteResult<()> {
    if limit <= 0 {
        return Err(NoteError::Validation(format!(
            "limit must be positive, got {}",
            limit
        )));
    }
    if offset < 0 {
        return Err(NoteError::Validation(format!(
            "offset must not be negative, got {}",
            offset
        )));
    }
    Ok(())
}
