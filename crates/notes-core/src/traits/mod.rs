//! Store and collaborator traits (ports)

mod repositories;

pub use repositories::{
    NoteRepository, RepoResult, SessionRepository, SpellChecker, UserRepository,
};
