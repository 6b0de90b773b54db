//! Errors returned by the note lifecycle

use uuid::Uuid;

/// Failure of a note operation
#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    /// Unknown or soft-deleted note
    #[error("note not found: {0}")]
    NoteNotFound(Uuid),

    /// The note exists but the requested history window holds no revisions
    #[error("no revisions in the requested range for note {0}")]
    EmptyPage(Uuid),

    #[error("{0}")]
    Validation(String),

    /// Search index, revision store or channel service failure
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

pub type NoteResult<T> = std::result::Result<T, NoteError>;
