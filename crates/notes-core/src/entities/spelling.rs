//! Spelling error reported by the external speller

use serde::{Deserialize, Serialize};

/// One misspelled word, in the Yandex Speller wire shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellError {
    pub code: i32,
    pub pos: i32,
    #[serde(default)]
    pub row: i32,
    #[serde(default)]
    pub col: i32,
    #[serde(default)]
    pub len: i32,
    pub word: String,
    #[serde(rename = "s", default)]
    pub suggestions: Vec<String>,
}
