use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;

use crate::errors::InternalError;
use crate::types::internal::Claims;

/// Issues and verifies signed, time-limited bearer tokens
pub struct TokenService {
    secret: String,
    algorithm: Algorithm,
    ttl_seconds: i64,
}

impl TokenService {
    /// Create a TokenService
    ///
    /// `algorithm` is expected to be one of the HMAC variants; `AppSettings`
    /// refuses anything else.
    pub fn new(secret: impl Into<String>, algorithm: Algorithm, ttl_seconds: i64) -> Self {
        Self {
            secret: secret.into(),
            algorithm,
            ttl_seconds,
        }
    }

    /// Lifetime of tokens from `issue`, in seconds
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Issue a token for `subject` valid for the configured lifetime
    pub fn issue(&self, subject: &str) -> Result<String, InternalError> {
        self.issue_at(subject, Utc::now().timestamp(), self.ttl_seconds)
    }

    /// Issue a token with an explicit clock and lifetime
    pub fn issue_at(&self, subject: &str, now: i64, ttl_seconds: i64) -> Result<String, InternalError> {
        let claims = Claims {
            sub: subject.to_string(),
            exp: now + ttl_seconds,
            iat: now,
        };

        encode(
            &Header::new(self.algorithm),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| InternalError::crypto("token_encode", e.to_string()))
    }

    /// Verify a token against the current time
    pub fn verify(&self, token: &str) -> Option<Claims> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token against an explicit clock
    ///
    /// Returns `None` for every kind of rejection. Callers cannot tell an
    /// expired token from a forged one; the reason only goes to the debug log.
    pub fn verify_at(&self, token: &str, now: i64) -> Option<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = match decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        ) {
            Ok(data) => data.claims,
            Err(e) => {
                tracing::debug!(reason = rejection_class(e.kind()), "Token rejected");
                return None;
            }
        };

        if claims.exp <= now {
            tracing::debug!(reason = "expired", "Token rejected");
            return None;
        }

        Some(claims)
    }
}

fn rejection_class(kind: &ErrorKind) -> &'static str {
    match kind {
        ErrorKind::InvalidSignature => "signature",
        ErrorKind::InvalidAlgorithm => "algorithm",
        ErrorKind::MissingRequiredClaim(_) => "missing_claim",
        ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => "malformed",
        _ => "other",
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl fmt::Display for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TokenService {{ algorithm: {:?}, ttl: {}s }}",
            self.algorithm, self.ttl_seconds
        )
    }
}
