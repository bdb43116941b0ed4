//! Note entity - a private text note owned by a user

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Note entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub note: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Create a new Note
    pub fn new(id: i64, user_id: i64, note: String) -> Self {
        Self {
            id,
            note,
            user_id,
            created_at: Utc::now(),
        }
    }
}

/// Page selection for note listings.
///
/// `All` is used whenever the caller did not supply a positive page and limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotePage {
    #[default]
    All,
    Page { page: i64, limit: i64 },
}

impl NotePage {
    /// Build a page selection from raw, possibly missing query values.
    ///
    /// Any absent or non-positive value selects all notes.
    pub fn from_query(page: Option<i64>, limit: Option<i64>) -> Self {
        match (page, limit) {
            (Some(page), Some(limit)) if page > 0 && limit > 0 => Self::Page { page, limit },
            _ => Self::All,
        }
    }

    /// Row offset for this page, `None` for `All`
    pub fn offset(&self) -> Option<i64> {
        match self {
            Self::All => None,
            Self::Page { page, limit } => Some((page - 1).saturating_mul(*limit)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_from_query() {
        assert_eq!(
            NotePage::from_query(Some(2), Some(10)),
            NotePage::Page { page: 2, limit: 10 }
        );
        assert_eq!(NotePage::from_query(None, Some(10)), NotePage::All);
        assert_eq!(NotePage::from_query(Some(1), None), NotePage::All);
        assert_eq!(NotePage::from_query(Some(0), Some(10)), NotePage::All);
        assert_eq!(NotePage::from_query(Some(3), Some(-1)), NotePage::All);
    }

    #[test]
    fn test_page_offset() {
        assert_eq!(NotePage::All.offset(), None);
        assert_eq!(NotePage::Page { page: 1, limit: 5 }.offset(), Some(0));
        assert_eq!(NotePage::Page { page: 3, limit: 5 }.offset(), Some(10));
    }
}
