//! User model -> entity mapper

use notes_core::entities::User;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            email: model.email,
            password_hash: model.pass_hash,
            created_at: model.created_at,
        }
    }
}
