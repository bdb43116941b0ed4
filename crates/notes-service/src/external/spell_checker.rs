//! Spell checker clients
//!
//! [`HttpSpellChecker`] talks to a Yandex Speller compatible endpoint
//! (`GET {url}?text=...` returning a JSON array of errors).

use std::time::Duration;

use async_trait::async_trait;
use notes_common::AppError;
use notes_core::traits::{RepoResult, SpellChecker};
use notes_core::{DomainError, SpellError};
use tracing::{debug, instrument};

/// Spell checker backed by an HTTP speller service
#[derive(Debug, Clone)]
pub struct HttpSpellChecker {
    http: reqwest::Client,
    url: String,
}

impl HttpSpellChecker {
    /// Create a client for the speller at `url`
    ///
    /// # Errors
    /// Returns `Config` if the HTTP client cannot be built
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build spell checker client: {e}")))?;

        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

#[async_trait]
impl SpellChecker for HttpSpellChecker {
    #[instrument(skip(self, text), fields(url = %self.url, text_len = text.len()))]
    async fn check_spelling(&self, text: &str) -> RepoResult<Vec<SpellError>> {
        let resp = self
            .http
            .get(&self.url)
            .query(&[("text", text)])
            .send()
            .await
            .map_err(|e| DomainError::ExternalServiceError(format!("speller request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DomainError::ExternalServiceError(format!(
                "speller responded with {status}"
            )));
        }

        let errors: Vec<SpellError> = resp.json().await.map_err(|e| {
            DomainError::ExternalServiceError(format!("undecodable speller response: {e}"))
        })?;

        debug!(count = errors.len(), "Spell check complete");
        Ok(errors)
    }
}

/// Spell checker that never reports errors
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpellChecker;

#[async_trait]
impl SpellChecker for NoopSpellChecker {
    async fn check_spelling(&self, _text: &str) -> RepoResult<Vec<SpellError>> {
        Ok(Vec::new())
    }
}
