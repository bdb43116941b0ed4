//! Note model -> entity mapper

use notes_core::entities::Note;

use crate::models::NoteModel;

/// Convert NoteModel to Note entity
impl From<NoteModel> for Note {
    fn from(model: NoteModel) -> Self {
        Note {
            id: model.id,
            note: model.note,
            user_id: model.user_id,
            created_at: model.created_at,
        }
    }
}
