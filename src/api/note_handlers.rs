//! Note API handlers

use super::handlers::{forwarded_user, parse_id, parse_json, ApiState, AppError};
use super::query::{parse_note_search, HistoryParams};
use crate::notes::{
    CreateNoteRequest, CreatedNote, HistoryPage, NoteSearchPage, NoteView, UpdateNoteRequest,
};
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};

/// Search notes of a channel
pub async fn search_notes(
    State(state): State<ApiState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<NoteSearchPage>, AppError> {
    let req = parse_note_search(&pairs).map_err(AppError::BadRequest)?;
    Ok(Json(state.notes.search_notes(&req).await?))
}

/// Create an empty note.
///
/// The channel comes from the body, then from the requesting user's default
/// channel; otherwise the note is left unassigned.
pub async fn create_note(
    State(state): State<ApiState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CreatedNote>, AppError> {
    let req: CreateNoteRequest = if body.iter().all(u8::is_ascii_whitespace) {
        CreateNoteRequest::default()
    } else {
        parse_json(&body)?
    };

    let channel = match (req.channel, forwarded_user(&headers)) {
        (Some(channel), _) => Some(channel),
        (None, Some(user)) => state.users.default_channel(&user).await?,
        (None, None) => None,
    };

    Ok(Json(state.notes.create_note(channel).await?))
}

/// Get the current state of a note
pub async fn get_note(
    State(state): State<ApiState>,
    Path(note_id): Path<String>,
) -> Result<Json<NoteView>, AppError> {
    let id = parse_id(&note_id, "note")?;
    Ok(Json(state.notes.get_note(id).await?))
}

/// Write a new revision of a note
pub async fn update_note(
    State(state): State<ApiState>,
    Path(note_id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&note_id, "note")?;
    let req: UpdateNoteRequest = parse_json(&body)?;
    state.notes.update_note(id, req).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a note
pub async fn delete_note(
    State(state): State<ApiState>,
    Path(note_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&note_id, "note")?;
    state.notes.delete_note(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Revision history of a note, newest first
pub async fn get_history(
    State(state): State<ApiState>,
    Path(note_id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<HistoryPage>, AppError> {
    let id = parse_id(&note_id, "note")?;
    let (limit, offset) = params.window().map_err(AppError::BadRequest)?;
    Ok(Json(state.notes.get_history(id, limit, offset).await?))
}

/// Rebuild the search projection of a note from its revisions
pub async fn repair_note(
    State(state): State<ApiState>,
    Path(note_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&note_id, "note")?;
    state.notes.repair_note(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
