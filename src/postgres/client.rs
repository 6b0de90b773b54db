//! PostgreSQL client for the revision store

use super::models::{NoteRecord, RevisionRecord, RevisionRow};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Default maximum number of connections in the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default connection acquire timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Pool configuration options.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: 1,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            idle_timeout: Duration::from_secs(600),
        }
    }
}

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS notes (
        id UUID PRIMARY KEY,
        latest_revision UUID NOT NULL,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL,
        deleted_at TIMESTAMPTZ
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS note_revisions (
        note_id UUID NOT NULL REFERENCES notes (id),
        revision_id UUID PRIMARY KEY,
        channel UUID NOT NULL,
        permission TEXT NOT NULL,
        title TEXT NOT NULL,
        summary TEXT NOT NULL,
        body TEXT NOT NULL,
        tags TEXT[] NOT NULL DEFAULT '{}',
        updated_at TIMESTAMPTZ NOT NULL
    )
    "#,
    "ALTER TABLE note_revisions ADD COLUMN IF NOT EXISTS tags TEXT[] NOT NULL DEFAULT '{}'",
    r#"
    CREATE INDEX IF NOT EXISTS idx_note_revisions_note_updated
        ON note_revisions (note_id, updated_at DESC, revision_id DESC)
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS user_settings (
        user_name TEXT PRIMARY KEY,
        default_channel UUID NOT NULL
    )
    "#,
];

/// Client for PostgreSQL operations
pub struct PgClient {
    pool: PgPool,
}

impl PgClient {
    /// Connect with the default pool configuration and ensure the schema exists
    pub async fn new(database_url: &str) -> Result<Self> {
        Self::with_config(database_url, PoolConfig::default()).await
    }

    /// Connect with a custom pool configuration and ensure the schema exists
    pub async fn with_config(database_url: &str, config: PoolConfig) -> Result<Self> {
        let start = Instant::now();

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout)
            .connect(database_url)
            .await
            .context("Failed to connect to PostgreSQL")?;

        tracing::info!(
            max_connections = config.max_connections,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "PostgreSQL pool ready"
        );

        let client = Self { pool };
        client.init_schema().await?;
        Ok(client)
    }

    /// Create tables and indexes if they don't exist
    pub async fn init_schema(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .context("Failed to initialize schema")?;
        }
        Ok(())
    }

    // ========================================================================
    // Notes and revisions
    // ========================================================================

    /// Insert a note pointer row and its first revision in one transaction
    pub async fn create_note(&self, note: &NoteRecord, first: &RevisionRecord) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO notes (id, latest_revision, created_at, updated_at, deleted_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(note.id)
        .bind(note.latest_revision)
        .bind(note.created_at)
        .bind(note.updated_at)
        .bind(note.deleted_at)
        .execute(&mut *tx)
        .await
        .context("Failed to insert note")?;

        insert_revision(&mut tx, first).await?;

        tx.commit().await?;
        Ok(())
    }

    /// Get a note pointer row by id
    pub async fn get_note(&self, id: Uuid) -> Result<Option<NoteRecord>> {
        let note = sqlx::query_as::<_, NoteRecord>(
            r#"
            SELECT id, latest_revision, created_at, updated_at, deleted_at
            FROM notes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch note")?;
        Ok(note)
    }

    /// Move the note pointer and append the revision in one transaction
    pub async fn append_revision(&self, revision: &RevisionRecord) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE notes SET latest_revision = $2, updated_at = $3 WHERE id = $1")
            .bind(revision.note_id)
            .bind(revision.revision_id)
            .bind(revision.updated_at)
            .execute(&mut *tx)
            .await
            .context("Failed to update note pointer")?;

        insert_revision(&mut tx, revision).await?;

        tx.commit().await?;
        Ok(())
    }

    /// Set `deleted_at` on a live note
    pub async fn soft_delete_note(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool> {
        let result =
            sqlx::query("UPDATE notes SET deleted_at = $2 WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .bind(at)
                .execute(&self.pool)
                .await
                .context("Failed to soft-delete note")?;
        Ok(result.rows_affected() > 0)
    }

    /// Revisions of a note, newest first
    pub async fn list_revisions(
        &self,
        note_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RevisionRecord>> {
        let rows = sqlx::query_as::<_, RevisionRow>(
            r#"
            SELECT note_id, revision_id, channel, permission, title, summary, body, tags, updated_at
            FROM note_revisions
            WHERE note_id = $1
            ORDER BY updated_at DESC, revision_id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(note_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list revisions")?;

        rows.into_iter().map(RevisionRecord::try_from).collect()
    }

    /// Get a single revision by id
    pub async fn get_revision(&self, revision_id: Uuid) -> Result<Option<RevisionRecord>> {
        let row = sqlx::query_as::<_, RevisionRow>(
            r#"
            SELECT note_id, revision_id, channel, permission, title, summary, body, tags, updated_at
            FROM note_revisions
            WHERE revision_id = $1
            "#,
        )
        .bind(revision_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch revision")?;

        row.map(RevisionRecord::try_from).transpose()
    }

    // ========================================================================
    // User settings
    // ========================================================================

    /// Default channel preference of a user
    pub async fn get_default_channel(&self, user_name: &str) -> Result<Option<Uuid>> {
        let row: Option<(Uuid,)> =
            sqlx::query_as("SELECT default_channel FROM user_settings WHERE user_name = $1")
                .bind(user_name)
                .fetch_optional(&self.pool)
                .await
                .context("Failed to fetch user settings")?;
        Ok(row.map(|r| r.0))
    }

    /// Upsert the default channel preference of a user
    pub async fn set_default_channel(&self, user_name: &str, channel: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_settings (user_name, default_channel)
            VALUES ($1, $2)
            ON CONFLICT (user_name) DO UPDATE SET default_channel = EXCLUDED.default_channel
            "#,
        )
        .bind(user_name)
        .bind(channel)
        .execute(&self.pool)
        .await
        .context("Failed to store user settings")?;
        Ok(())
    }

    // ========================================================================
    // Health
    // ========================================================================

    /// Check connectivity with a trivial query
    pub async fn health_check(&self) -> Result<bool> {
        Ok(sqlx::query("SELECT 1").execute(&self.pool).await.is_ok())
    }
}

async fn insert_revision(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    revision: &RevisionRecord,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO note_revisions
            (note_id, revision_id, channel, permission, title, summary, body, tags, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(revision.note_id)
    .bind(revision.revision_id)
    .bind(revision.channel)
    .bind(revision.permission.to_string())
    .bind(&revision.title)
    .bind(&revision.summary)
    .bind(&revision.body)
    .bind(&revision.tags)
    .bind(revision.updated_at)
    .execute(&mut **tx)
    .await
    .context("Failed to insert revision")?;
    Ok(())
}
