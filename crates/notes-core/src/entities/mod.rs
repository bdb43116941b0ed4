//! Domain entities - core business objects

mod claims;
mod note;
mod session;
mod spelling;
mod user;

pub use claims::AccessClaims;
pub use note::{Note, NotePage};
pub use session::RefreshSession;
pub use spelling::SpellError;
pub use user::User;
