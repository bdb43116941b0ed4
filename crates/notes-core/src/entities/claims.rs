//! Access claims - the verified content of an access token

use chrono::{DateTime, Utc};

/// Subject and expiry extracted from a verified access token.
///
/// Never persisted; lives only as long as the request that verified it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessClaims {
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}

impl AccessClaims {
    pub fn new(user_id: i64, expires_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            expires_at,
        }
    }
}
