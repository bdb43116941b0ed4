//! JWT utilities for authentication
//!
//! Issues and verifies HS256 access tokens and generates opaque refresh
//! tokens using the `jsonwebtoken` crate.

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use notes_core::AccessClaims;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// The only accepted signing algorithm
const ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Unique token id
    pub jti: String,
}

impl Claims {
    /// Get the user ID
    ///
    /// # Errors
    /// Returns an error if the subject is not a numeric id
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.sub.parse::<i64>().map_err(|_| AppError::InvalidToken)
    }

    /// Get the expiry as a timestamp
    ///
    /// # Errors
    /// Returns an error if `exp` is out of range
    pub fn expires_at(&self) -> Result<DateTime<Utc>, AppError> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .ok_or(AppError::InvalidToken)
    }
}

/// Token pair issued on login and refresh
#[derive(Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// When the refresh token stops being accepted
    pub refresh_expires_at: DateTime<Utc>,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("refresh_expires_at", &self.refresh_expires_at)
            .field("expires_in", &self.expires_in)
            .finish_non_exhaustive()
    }
}

/// JWT service for issuing and verifying tokens
///
/// The signing key is fixed for the lifetime of the service.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl JwtService {
    /// Create a new JWT service with the given secret and expiry times (seconds)
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64, refresh_token_expiry: i64) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            access_token_expiry,
            refresh_token_expiry,
        }
    }

    /// Access token lifetime in seconds
    #[must_use]
    pub fn access_token_expiry(&self) -> i64 {
        self.access_token_expiry
    }

    /// Refresh token lifetime in seconds
    #[must_use]
    pub fn refresh_token_expiry(&self) -> i64 {
        self.refresh_token_expiry
    }

    /// Generate a fresh access/refresh pair for a user
    ///
    /// # Errors
    /// Returns an error if token encoding fails or a lifetime is out of range
    pub fn generate_token_pair(&self, user_id: i64) -> Result<TokenPair, AppError> {
        let now = Utc::now();
        let access_token = self.encode_access_token(user_id, now)?;

        Ok(TokenPair {
            access_token,
            refresh_token: Self::generate_refresh_token(),
            refresh_expires_at: offset(now, self.refresh_token_expiry)?,
            expires_in: self.access_token_expiry,
        })
    }

    /// Issue a signed access token for a user
    ///
    /// # Errors
    /// Returns an error if token encoding fails or the lifetime is out of range
    pub fn issue_access_token(&self, user_id: i64) -> Result<String, AppError> {
        self.encode_access_token(user_id, Utc::now())
    }

    /// Generate an opaque refresh token.
    ///
    /// Carries no claims; it only resolves to a user through the session store.
    #[must_use]
    pub fn generate_refresh_token() -> String {
        Uuid::new_v4().to_string()
    }

    fn encode_access_token(&self, user_id: i64, now: DateTime<Utc>) -> Result<String, AppError> {
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: offset(now, self.access_token_expiry)?.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode JWT")))
    }

    /// Decode and validate a JWT token
    ///
    /// Any failure (signature, algorithm, expiry, shape) is reported as
    /// `InvalidToken`.
    ///
    /// # Errors
    /// Returns an error if the token is invalid or expired
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::InvalidToken)
    }

    /// Verify an access token and return its subject and expiry
    ///
    /// # Errors
    /// Returns `InvalidToken` if the token cannot be trusted
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, AppError> {
        let claims = self.decode_token(token)?;
        Ok(AccessClaims::new(claims.user_id()?, claims.expires_at()?))
    }
}

fn offset(now: DateTime<Utc>, seconds: i64) -> Result<DateTime<Utc>, AppError> {
    Duration::try_seconds(seconds)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Token lifetime out of range")))
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-that-is-long-enough";

    fn create_test_service() -> JwtService {
        JwtService::new(SECRET, 900, 604_800)
    }

    #[test]
    fn test_generate_token_pair() {
        let service = create_test_service();

        let pair = service.generate_token_pair(12345).unwrap();

        assert!(!pair.access_token.is_empty());
        assert!(!pair.refresh_token.is_empty());
        assert_eq!(pair.expires_in, 900);
        assert!(pair.refresh_expires_at > Utc::now() + Duration::days(6));
    }

    #[test]
    fn test_issue_then_verify_round_trip() {
        let service = create_test_service();

        let token = service.issue_access_token(42).unwrap();
        let claims = service.verify_access_token(&token).unwrap();

        assert_eq!(claims.user_id, 42);
        assert!(claims.expires_at > Utc::now());
    }

    #[test]
    fn test_access_tokens_in_same_second_differ() {
        let service = create_test_service();

        let first = service.issue_access_token(42).unwrap();
        let second = service.issue_access_token(42).unwrap();

        assert_ne!(first, second);
        let a = service.decode_token(&first).unwrap();
        let b = service.decode_token(&second).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_out_of_range_lifetime_is_an_error() {
        let access = JwtService::new(SECRET, i64::MAX, 60);
        assert!(matches!(
            access.issue_access_token(42),
            Err(AppError::Internal(_))
        ));

        let refresh = JwtService::new(SECRET, 60, i64::MAX / 1000);
        assert!(matches!(
            refresh.generate_token_pair(42),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn test_refresh_token_is_opaque_and_unique() {
        let a = JwtService::generate_refresh_token();
        let b = JwtService::generate_refresh_token();

        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
        assert!(create_test_service().decode_token(&a).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = JwtService::new(SECRET, -60, 604_800);

        let token = service.issue_access_token(42).unwrap();
        let result = service.verify_access_token(&token);

        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_test_service().issue_access_token(42).unwrap();
        let other = JwtService::new("a-completely-different-secret-key", 900, 604_800);

        assert!(matches!(
            other.verify_access_token(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_algorithm_rejected() {
        let claims = Claims {
            sub: "42".to_string(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::minutes(5)).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let result = create_test_service().verify_access_token(&token);
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_non_numeric_subject_rejected() {
        let claims = Claims {
            sub: "not-a-number".to_string(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::minutes(5)).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let result = create_test_service().verify_access_token(&token);
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_invalid_token() {
        let service = create_test_service();

        let result = service.decode_token("invalid.token.here");
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_claims_user_id() {
        let claims = Claims {
            sub: "12345".to_string(),
            iat: 0,
            exp: i64::MAX,
            jti: String::new(),
        };

        assert_eq!(claims.user_id().unwrap(), 12345);
    }

    #[test]
    fn test_debug_hides_keys() {
        let debug = format!("{:?}", create_test_service());
        assert!(!debug.contains(SECRET));
    }
}
