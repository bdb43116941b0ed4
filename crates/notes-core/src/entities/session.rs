//! Refresh session entity - the single live refresh token of a user

use chrono::{DateTime, Utc};

/// One persisted refresh token.
///
/// At most one row exists per user; login and refresh overwrite the token
/// and expiry in place instead of inserting a second row.
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshSession {
    pub id: i64,
    pub user_id: i64,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl RefreshSession {
    /// Create a new RefreshSession
    pub fn new(id: i64, user_id: i64, token: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            token,
            expires_at,
        }
    }

    /// Check if the session has expired
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Check expiry against a given instant
    #[inline]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

impl std::fmt::Debug for RefreshSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshSession")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .field("token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_session_not_expired() {
        let session = RefreshSession::new(
            1,
            7,
            "token".to_string(),
            Utc::now() + Duration::hours(1),
        );
        assert!(!session.is_expired());
    }

    #[test]
    fn test_session_expired() {
        let session = RefreshSession::new(
            1,
            7,
            "token".to_string(),
            Utc::now() - Duration::seconds(1),
        );
        assert!(session.is_expired());
    }

    #[test]
    fn test_expiry_boundary_counts_as_expired() {
        let now = Utc::now();
        let session = RefreshSession::new(1, 7, "token".to_string(), now);
        assert!(session.is_expired_at(now));
        assert!(!session.is_expired_at(now - Duration::milliseconds(1)));
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = RefreshSession::new(1, 7, "super-secret".to_string(), Utc::now());
        assert!(!format!("{session:?}").contains("super-secret"));
    }
}
