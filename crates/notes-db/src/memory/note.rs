//! In-memory NoteRepository

use async_trait::async_trait;
use parking_lot::Mutex;

use notes_core::entities::Note;
use notes_core::traits::{NoteRepository, RepoResult};

/// In-memory note store; notes are kept in insertion (id) order
#[derive(Default)]
pub struct InMemoryNoteRepository {
    notes: Mutex<Vec<Note>>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn save_note(&self, user_id: i64, note: &str) -> RepoResult<i64> {
        let mut notes = self.notes.lock();
        let id = notes.last().map_or(1, |last| last.id + 1);
        notes.push(Note::new(id, user_id, note.to_string()));
        Ok(id)
    }

    async fn notes_by_user(&self, user_id: i64) -> RepoResult<Vec<Note>> {
        Ok(self
            .notes
            .lock()
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn notes_page_by_user(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Note>> {
        let skip = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let take = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);

        Ok(self
            .notes
            .lock()
            .iter()
            .filter(|n| n.user_id == user_id)
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }
}
