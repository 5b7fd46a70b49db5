//! Bearer token issuing and verification
//!
//! Signature validity and time validity are deliberately separate: `verify`
//! answers "who signed this" and leaves "is this still valid now" to the
//! caller, while `check` folds both into a tagged result for callers that
//! do not need custom clock handling.

use crate::{config::SecurityConfig, error::SecurityError, Result};
use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// JWT claims carried by an access token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user or service identifier)
    pub sub: String,

    /// Expiration (unix seconds)
    pub exp: i64,

    /// Optional scope/permissions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// Decoded token contents returned to callers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenData {
    pub subject: String,
    pub expires_at: DateTime<Utc>,
    pub scope: Option<String>,
}

impl TokenData {
    /// Whether the token has expired relative to the given instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Whether the token has expired relative to the current wall clock.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Combined signature + expiry verdict
///
/// Returned by [`TokenIssuer::check`] so the expiry branch cannot be
/// silently forgotten by callers of the two-step `verify` contract.
#[derive(Debug, Clone)]
pub enum TokenCheck {
    /// Signature valid and not yet expired
    Valid(TokenData),

    /// Signature valid but past its expiry
    Expired(TokenData),

    /// Malformed encoding or signature mismatch
    InvalidSignature,
}

/// Token issuer/verifier service
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: jsonwebtoken::Algorithm,
    default_ttl_secs: u64,
}

impl TokenIssuer {
    /// Create token issuer from config
    pub fn from_config(config: &SecurityConfig) -> Result<Self> {
        let secret = config.jwt_secret.expose_secret();

        // Ensure secret is at least 32 bytes for HS256
        if secret.len() < 32 {
            return Err(SecurityError::config("JWT secret too short (min 32 chars)"));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: config.signing_algorithm.as_jwt(),
            default_ttl_secs: config.access_token_ttl_secs,
        })
    }

    /// Issue a signed access token.
    ///
    /// `subject` accepts anything displayable (user IDs are strings or
    /// integers depending on the service) and is coerced to a string claim.
    /// `ttl` overrides the configured default lifetime and must be positive.
    pub fn issue(
        &self,
        subject: impl std::fmt::Display,
        ttl: Option<Duration>,
        scope: Option<&str>,
    ) -> Result<String> {
        let subject = subject.to_string();
        if subject.is_empty() {
            return Err(SecurityError::invalid_input("subject must not be empty"));
        }

        let ttl = match ttl {
            Some(ttl) if ttl <= Duration::zero() => {
                return Err(SecurityError::invalid_input("token ttl must be positive"));
            }
            Some(ttl) => ttl,
            None => Duration::seconds(self.default_ttl_secs as i64),
        };

        let expiration = Utc::now() + ttl;

        let claims = Claims {
            sub: subject,
            exp: expiration.timestamp(),
            scope: scope.map(str::to_string),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode access token: {:?}", e);
            SecurityError::internal(format!("Failed to encode access token: {}", e))
        })
    }

    /// Verify the signature and decode a token.
    ///
    /// Expiry is data, not a verification failure: the returned `expires_at`
    /// must still be compared against the clock by the caller (or use
    /// [`Self::check`], which does both).
    pub fn verify(&self, token: &str) -> Result<TokenData> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!("Token verification failed: {:?}", e);
                SecurityError::InvalidSignature
            })?
            .claims;

        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .ok_or(SecurityError::InvalidSignature)?;

        Ok(TokenData { subject: claims.sub, expires_at, scope: claims.scope })
    }

    /// Verify signature and expiry against the current wall clock.
    pub fn check(&self, token: &str) -> TokenCheck {
        self.check_at(token, Utc::now())
    }

    /// Verify signature and expiry against an explicit instant, for callers
    /// applying clock-skew tolerance or deterministic clocks in tests.
    pub fn check_at(&self, token: &str, now: DateTime<Utc>) -> TokenCheck {
        match self.verify(token) {
            Ok(data) if data.is_expired_at(now) => TokenCheck::Expired(data),
            Ok(data) => TokenCheck::Valid(data),
            Err(_) => TokenCheck::InvalidSignature,
        }
    }
}
