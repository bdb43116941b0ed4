//! Clients for services outside this process

mod spell_checker;

pub use spell_checker::{HttpSpellChecker, NoopSpellChecker};
