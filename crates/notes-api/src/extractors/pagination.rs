//! Pagination extractor
//!
//! Extracts `page`/`limit` from the note listing query string. Parsing is
//! lenient: anything missing, unparseable, or non-positive selects all notes.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use notes_core::NotePage;
use serde::Deserialize;

use crate::response::ApiError;

/// Raw pagination query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

impl From<PageParams> for NotePage {
    fn from(params: PageParams) -> Self {
        let parse = |raw: Option<String>| raw.and_then(|v| v.trim().parse::<i64>().ok());
        NotePage::from_query(parse(params.page), parse(params.limit))
    }
}

/// Page selection for `GET /api/notes`
#[derive(Debug, Clone, Copy, Default)]
pub struct NotesQuery(pub NotePage);

#[async_trait]
impl<S> FromRequestParts<S> for NotesQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = Query::<PageParams>::from_request_parts(parts, state)
            .await
            .map(|Query(params)| params)
            .unwrap_or_default();

        Ok(NotesQuery(params.into()))
    }
}
