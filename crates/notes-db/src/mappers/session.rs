//! Session model -> entity mapper

use notes_core::entities::RefreshSession;

use crate::models::SessionModel;

/// Convert SessionModel to RefreshSession entity
impl From<SessionModel> for RefreshSession {
    fn from(model: SessionModel) -> Self {
        RefreshSession::new(model.id, model.user_id, model.token, model.expires_at)
    }
}
