//! JWT token generation and validation
//!
//! Session tokens are signed with a shared secret and carry the username
//! as subject. They are stateless: nothing is stored server side, and a
//! token stays valid until its `exp` passes.

use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username). Optional on decode so a token without one can be
    /// rejected by the caller rather than by the decoder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: i64,
}

/// Reason a token failed validation
///
/// For internal diagnostics only. Callers must not reveal the variant to
/// the client.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("signature or algorithm mismatch")]
    InvalidSignature,

    #[error("malformed token")]
    Malformed,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
            _ => TokenError::Malformed,
        }
    }
}

/// Pre-computed JWT keys for efficient token operations
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    /// This should be called once at startup
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// JWT service for token operations
///
/// The algorithm is fixed at construction; tokens signed with any other
/// algorithm or key are rejected.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    algorithm: Algorithm,
    validation: Arc<Validation>,
    default_lifetime: Duration,
}

impl JwtService {
    /// Create a new JWT service with pre-computed keys
    ///
    /// Call this once at application startup and store in AppState.
    pub fn new(secret: &str, algorithm: Algorithm, default_lifetime: Duration) -> Self {
        let mut validation = Validation::new(algorithm);
        // Expired means expired: no grace period past `exp`
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            keys: JwtKeys::new(secret),
            algorithm,
            validation: Arc::new(validation),
            default_lifetime,
        }
    }

    /// Issue a token for `subject`, valid for `expires_in` or the configured default
    pub fn issue(&self, subject: &str, expires_in: Option<Duration>) -> Result<String> {
        let now = Utc::now();
        let exp = now + expires_in.unwrap_or(self.default_lifetime);

        let claims = Claims {
            sub: Some(subject.to_string()),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to issue token: {}", e))
    }

    /// Validate signature, algorithm and expiry, returning the claims
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(token, &self.keys.decoding, &self.validation)?;
        Ok(token_data.claims)
    }

    /// Default token lifetime
    #[inline]
    pub fn default_lifetime(&self) -> Duration {
        self.default_lifetime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> JwtService {
        JwtService::new("test-secret", Algorithm::HS256, Duration::minutes(30))
    }

    #[test]
    fn test_issue_and_validate() {
        let service = create_test_service();

        let token = service.issue("alice", None).unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.sub.as_deref(), Some("alice"));
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_explicit_lifetime_overrides_default() {
        let service = create_test_service();

        let token = service.issue("alice", Some(Duration::minutes(5))).unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 5 * 60);
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = create_test_service();

        let token = service.issue("alice", Some(Duration::seconds(-5))).unwrap();

        assert_eq!(service.validate(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn test_token_expires_once_lifetime_elapses() {
        let service = create_test_service();

        let token = service.issue("alice", Some(Duration::seconds(1))).unwrap();
        assert!(service.validate(&token).is_ok());

        std::thread::sleep(std::time::Duration::from_millis(2100));
        assert_eq!(service.validate(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = create_test_service();
        let other = JwtService::new("another-secret", Algorithm::HS256, Duration::minutes(30));

        let token = other.issue("alice", None).unwrap();

        assert_eq!(service.validate(&token).unwrap_err(), TokenError::InvalidSignature);
    }

    #[test]
    fn test_wrong_algorithm_rejected() {
        let service = create_test_service();
        let other = JwtService::new("test-secret", Algorithm::HS512, Duration::minutes(30));

        let token = other.issue("alice", None).unwrap();

        assert_eq!(service.validate(&token).unwrap_err(), TokenError::InvalidSignature);
    }

    #[test]
    fn test_invalid_token_rejected() {
        let service = create_test_service();

        assert_eq!(service.validate("invalid.token.here").unwrap_err(), TokenError::Malformed);
        assert_eq!(service.validate("").unwrap_err(), TokenError::Malformed);
    }

    #[test]
    fn test_token_without_subject_still_decodes() {
        #[derive(Serialize)]
        struct Anonymous {
            exp: i64,
        }

        let service = create_test_service();
        let claims = Anonymous {
            exp: (Utc::now() + Duration::minutes(1)).timestamp(),
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(b"test-secret")).unwrap();

        assert!(service.validate(&token).unwrap().sub.is_none());
    }

    #[test]
    fn test_token_without_exp_rejected() {
        #[derive(Serialize)]
        struct Forever {
            sub: String,
        }

        let service = create_test_service();
        let token = encode(
            &Header::default(),
            &Forever { sub: "alice".to_string() },
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(service.validate(&token).is_err());
    }

    #[test]
    fn test_service_is_clone_cheap() {
        let service = create_test_service();
        let cloned = service.clone(); // Should be cheap due to Arc
        let token = service.issue("bob", None).unwrap();
        assert!(cloned.validate(&token).is_ok());
    }
}
