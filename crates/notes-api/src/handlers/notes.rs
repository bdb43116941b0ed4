//! Note handlers
//!
//! Endpoints for creating and listing the caller's notes.

use axum::{extract::State, Json};
use notes_service::{CreateNoteRequest, CreateNoteResponse, NoteService, NotesResponse};

use crate::extractors::{AuthUser, NotesQuery, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create a note for the authenticated user
///
/// POST /api/notes
pub async fn create_note(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateNoteRequest>,
) -> ApiResult<Created<Json<CreateNoteResponse>>> {
    let (id, spelling_errors) = NoteService::new(state.service_context())
        .create_note(auth.user_id, request)
        .await?;

    Ok(Created(Json(CreateNoteResponse {
        id,
        spelling_errors,
    })))
}

/// List the authenticated user's notes
///
/// GET /api/notes?page=&limit=
pub async fn list_notes(
    State(state): State<AppState>,
    auth: AuthUser,
    NotesQuery(page): NotesQuery,
) -> ApiResult<Json<NotesResponse>> {
    let notes = NoteService::new(state.service_context())
        .list_notes(auth.user_id, page)
        .await?;

    Ok(Json(NotesResponse::from(notes)))
}
