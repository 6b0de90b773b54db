//! Meilisearch client for search operations

use super::indexes::*;
use anyhow::{Context, Result};
use meilisearch_sdk::{
    client::Client,
    errors::{Error as MeiliError, ErrorCode, MeilisearchError},
    search::SearchResults,
    settings::{PaginationSetting, Settings},
};

/// Floor for `maxTotalHits` on the notes index. Meilisearch defaults to 1000,
/// which would cap both pattern scans and the deepest reachable offset.
pub const MIN_MAX_TOTAL_HITS: usize = 100_000;

/// `maxTotalHits` for the notes index given the pattern-search scan size
pub fn notes_max_total_hits(max_scan: usize) -> usize {
    max_scan.max(MIN_MAX_TOTAL_HITS)
}

/// Settings applied to the notes index
pub fn notes_index_settings(max_total_hits: usize) -> Settings {
    Settings::new()
        .with_searchable_attributes(["title", "body", "tag"])
        .with_filterable_attributes(["channel", "tag", "permission"])
        .with_sortable_attributes(["updated_at", "created_at", "title"])
        .with_pagination(PaginationSetting { max_total_hits })
}

/// Client for Meilisearch operations
pub struct MeiliClient {
    client: Client,
    max_total_hits: usize,
}

impl MeiliClient {
    /// Create a new Meilisearch client. `max_scan` is the largest candidate
    /// window a pattern search will request from the notes index.
    pub async fn new(url: &str, api_key: &str, max_scan: usize) -> Result<Self> {
        let key = if api_key.is_empty() {
            None
        } else {
            Some(api_key)
        };
        let client = Client::new(url, key).context("Failed to create Meilisearch client")?;

        let meili = Self {
            client,
            max_total_hits: notes_max_total_hits(max_scan),
        };
        meili.init_indexes().await?;

        Ok(meili)
    }

    /// Initialize all required indexes
    async fn init_indexes(&self) -> Result<()> {
        for index_name in [index_names::NOTES, index_names::USERS] {
            let task = self
                .client
                .create_index(index_name, Some("id"))
                .await
                .context(format!("Failed to create index {}", index_name))?;

            // Wait for index creation
            task.wait_for_completion(&self.client, None, None).await?;
        }

        self.configure_notes_index().await?;

        Ok(())
    }

    /// Configure the notes index settings
    async fn configure_notes_index(&self) -> Result<()> {
        let index = self.client.index(index_names::NOTES);

        let settings = notes_index_settings(self.max_total_hits);
        let task = index.set_settings(&settings).await?;
        task.wait_for_completion(&self.client, None, None).await?;

        tracing::debug!(max_total_hits = self.max_total_hits, "Notes index configured");

        Ok(())
    }

    // ========================================================================
    // Note projections
    // ========================================================================

    /// Index a note projection (add-or-replace keyed by id)
    pub async fn index_note(&self, doc: &NoteDocument) -> Result<()> {
        let index = self.client.index(index_names::NOTES);
        let task = index.add_documents(&[doc], Some("id")).await?;
        task.wait_for_completion(&self.client, None, None).await?;
        Ok(())
    }

    /// Fetch a note projection by id
    pub async fn get_note(&self, id: &str) -> Result<Option<NoteDocument>> {
        let index = self.client.index(index_names::NOTES);
        match index.get_document::<NoteDocument>(id).await {
            Ok(doc) => Ok(Some(doc)),
            Err(MeiliError::Meilisearch(MeilisearchError {
                error_code: ErrorCode::DocumentNotFound,
                ..
            })) => Ok(None),
            Err(e) => Err(e).context(format!("Failed to fetch note {}", id)),
        }
    }

    /// Delete a note projection by id
    pub async fn delete_note(&self, id: &str) -> Result<()> {
        let index = self.client.index(index_names::NOTES);
        let task = index.delete_document(id).await?;
        task.wait_for_completion(&self.client, None, None).await?;
        Ok(())
    }

    /// Search note projections by channel, sorted and windowed
    pub async fn search_notes(&self, query: &NoteIndexQuery) -> Result<NoteIndexPage> {
        if query.channels.is_empty() {
            return Ok(NoteIndexPage::default());
        }

        if query.offset.saturating_add(query.limit) > self.max_total_hits {
            tracing::warn!(
                offset = query.offset,
                limit = query.limit,
                max_total_hits = self.max_total_hits,
                "Search window reaches past maxTotalHits, results will be cut short"
            );
        }

        let index = self.client.index(index_names::NOTES);
        let filter = query.channel_filter();
        let sort = [query.sort.as_index_sort()];

        let mut search = index.search();
        search
            .with_query("")
            .with_filter(&filter)
            .with_sort(&sort)
            .with_limit(query.limit)
            .with_offset(query.offset);

        let results: SearchResults<NoteDocument> = search.execute().await?;
        let total = results
            .estimated_total_hits
            .or(results.total_hits)
            .unwrap_or(results.hits.len());

        Ok(NoteIndexPage {
            hits: results.hits.into_iter().map(|h| h.result).collect(),
            total,
        })
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Index a user document
    pub async fn index_user(&self, doc: &UserDocument) -> Result<()> {
        let index = self.client.index(index_names::USERS);
        let task = index.add_documents(&[doc], Some("id")).await?;
        task.wait_for_completion(&self.client, None, None).await?;
        Ok(())
    }

    /// List users
    pub async fn list_users(&self, limit: usize) -> Result<Vec<UserDocument>> {
        let index = self.client.index(index_names::USERS);

        let results: SearchResults<UserDocument> = index
            .search()
            .with_query("")
            .with_limit(limit)
            .execute()
            .await?;

        Ok(results.hits.into_iter().map(|h| h.result).collect())
    }

    // ========================================================================
    // Health
    // ========================================================================

    /// Check connectivity to Meilisearch
    pub async fn health_check(&self) -> Result<bool> {
        Ok(self.client.is_healthy().await)
    }
}
