//! Note service
//!
//! Creates and lists a user's private notes. New notes are run through the
//! spell checker before they are stored.

use notes_common::AppError;
use notes_core::{DomainError, Note, NotePage, SpellError};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::CreateNoteRequest;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Note service
pub struct NoteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NoteService<'a> {
    /// Create a new NoteService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Spell check and store a note, returning its id and the spelling errors found
    #[instrument(skip(self, request))]
    pub async fn create_note(
        &self,
        user_id: i64,
        request: CreateNoteRequest,
    ) -> ServiceResult<(i64, Vec<SpellError>)> {
        request
            .validate()
            .map_err(|_| ServiceError::App(AppError::invalid_input("Empty note")))?;

        let spelling_errors = self
            .ctx
            .spell_checker()
            .check_spelling(&request.note)
            .await
            .map_err(|e| {
                warn!(error = %e, "Spell check failed");
                match e {
                    DomainError::ExternalServiceError(msg) => {
                        ServiceError::App(AppError::ExternalService(msg))
                    }
                    other => ServiceError::Domain(other),
                }
            })?;

        let note_id = self.ctx.note_repo().save_note(user_id, &request.note).await?;

        info!(
            note_id,
            spelling_errors = spelling_errors.len(),
            "Note created"
        );
        Ok((note_id, spelling_errors))
    }

    /// List a user's notes, oldest first
    #[instrument(skip(self))]
    pub async fn list_notes(&self, user_id: i64, page: NotePage) -> ServiceResult<Vec<Note>> {
        let notes = match page {
            NotePage::All => self.ctx.note_repo().notes_by_user(user_id).await?,
            NotePage::Page { limit, .. } => {
                let offset = page.offset().unwrap_or(0);
                self.ctx
                    .note_repo()
                    .notes_page_by_user(user_id, limit, offset)
                    .await?
            }
        };

        Ok(notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use notes_common::auth::JwtService;
    use notes_core::traits::{NoteRepository, RepoResult, SpellChecker};
    use notes_db::{InMemoryNoteRepository, InMemorySessionRepository, InMemoryUserRepository};

    use crate::external::NoopSpellChecker;
    use crate::services::ServiceContextBuilder;

    struct FixedSpellChecker(Vec<SpellError>);

    #[async_trait]
    impl SpellChecker for FixedSpellChecker {
        async fn check_spelling(&self, _text: &str) -> RepoResult<Vec<SpellError>> {
            Ok(self.0.clone())
        }
    }

    struct DownSpellChecker;

    #[async_trait]
    impl SpellChecker for DownSpellChecker {
        async fn check_spelling(&self, _text: &str) -> RepoResult<Vec<SpellError>> {
            Err(DomainError::ExternalServiceError("speller unavailable".to_string()))
        }
    }

    fn context(
        checker: Arc<dyn SpellChecker>,
        notes: Arc<InMemoryNoteRepository>,
    ) -> ServiceContext {
        ServiceContextBuilder::new()
            .user_repo(Arc::new(InMemoryUserRepository::new()))
            .session_repo(Arc::new(InMemorySessionRepository::new()))
            .note_repo(notes)
            .spell_checker(checker)
            .jwt_service(Arc::new(JwtService::new("test-secret", 900, 3600)))
            .build()
            .unwrap()
    }

    fn note(text: &str) -> CreateNoteRequest {
        CreateNoteRequest {
            note: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_note_returns_spelling_errors() {
        let typo = SpellError {
            code: 1,
            pos: 4,
            row: 0,
            col: 4,
            len: 4,
            word: "mlik".to_string(),
            suggestions: vec!["milk".to_string()],
        };
        let notes = Arc::new(InMemoryNoteRepository::new());
        let ctx = context(Arc::new(FixedSpellChecker(vec![typo.clone()])), notes.clone());

        let (id, errors) = NoteService::new(&ctx)
            .create_note(7, note("buy mlik"))
            .await
            .unwrap();

        assert_eq!(id, 1);
        assert_eq!(errors, vec![typo]);
        assert_eq!(notes.notes_by_user(7).await.unwrap()[0].note, "buy mlik");
    }

    #[tokio::test]
    async fn test_create_blank_note_rejected() {
        let notes = Arc::new(InMemoryNoteRepository::new());
        let ctx = context(Arc::new(NoopSpellChecker), notes.clone());

        let result = NoteService::new(&ctx).create_note(7, note("  ")).await;
        assert!(matches!(
            result,
            Err(ServiceError::App(AppError::InvalidInput(_)))
        ));
        assert!(notes.notes_by_user(7).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_spell_checker_failure_fails_create() {
        let notes = Arc::new(InMemoryNoteRepository::new());
        let ctx = context(Arc::new(DownSpellChecker), notes.clone());

        let result = NoteService::new(&ctx).create_note(7, note("hello")).await;
        match result {
            Err(err) => assert_eq!(err.status_code(), 502),
            Ok(_) => panic!("expected spell checker failure"),
        }
        assert!(notes.notes_by_user(7).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_notes_pages() {
        let ctx = context(
            Arc::new(NoopSpellChecker),
            Arc::new(InMemoryNoteRepository::new()),
        );
        let service = NoteService::new(&ctx);
        for i in 1..=5 {
            service.create_note(1, note(&format!("note {i}"))).await.unwrap();
        }
        service.create_note(2, note("other user")).await.unwrap();

        let all = service.list_notes(1, NotePage::All).await.unwrap();
        assert_eq!(all.len(), 5);
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));

        let page = service
            .list_notes(1, NotePage::from_query(Some(2), Some(2)))
            .await
            .unwrap();
        assert_eq!(
            page.iter().map(|n| n.note.as_str()).collect::<Vec<_>>(),
            vec!["note 3", "note 4"]
        );

        let fallback = service
            .list_notes(1, NotePage::from_query(Some(0), Some(2)))
            .await
            .unwrap();
        assert_eq!(fallback.len(), 5);
    }
}
