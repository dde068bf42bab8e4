//! JWT token utilities for authentication.
//!
//! Provides token creation and validation for logged-in users. The signing
//! secret and time-to-live come from [`Config`] at construction; time is read
//! through a [`Clock`] so expiry can be checked against a fixed instant.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::config::Config;

/// Source of the current time for issuing and validating tokens.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Identity carried by an access token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub id: String,
    pub username: String,
}

/// JWT claims: the subject's identity plus issuance and expiry timestamps.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User ID
    pub id: String,
    /// Username at the time of login
    pub username: String,
    /// Token issued at timestamp
    pub iat: i64,
    /// Token expiration timestamp
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.id
    }

    pub fn subject(&self) -> TokenSubject {
        TokenSubject {
            id: self.id.clone(),
            username: self.username.clone(),
        }
    }

    /// A token stops being valid at the exact second `exp` is reached.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Token generation failed: {0}")]
    Signing(String),
    #[error("Token validation failed: {0}")]
    Invalid(String),
    #[error("Token expired")]
    Expired,
}

/// JWT token utility for creating and validating tokens
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtUtils {
    /// Create a new JwtUtils instance from the loaded configuration
    pub fn new(config: &Config) -> Self {
        Self::with_clock(
            config.jwt_secret.as_bytes(),
            config.jwt_ttl,
            Arc::new(SystemClock),
        )
    }

    pub fn with_clock(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let encoding_key = EncodingKey::from_secret(secret);
        let decoding_key = DecodingKey::from_secret(secret);

        // Expiry is checked against `clock` in `validate_token`, not by the
        // library against the system time.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);

        JwtUtils {
            encoding_key,
            decoding_key,
            validation,
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Generate a token for `subject` using the configured time-to-live
    pub fn generate_token(&self, subject: TokenSubject) -> Result<String, JwtError> {
        self.generate_token_with_ttl(subject, self.ttl)
    }

    /// Generate a token for `subject` that expires `ttl` after now
    pub fn generate_token_with_ttl(
        &self,
        subject: TokenSubject,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        let now = self.clock.now();
        let exp = now
            .checked_add_signed(ttl)
            .ok_or_else(|| JwtError::Signing(format!("expiry out of range for ttl {}", ttl)))?;

        let claims = Claims {
            id: subject.id,
            username: subject.username,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::Signing(e.to_string()))
    }

    /// Validate and decode a JWT token
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| JwtError::Invalid(e.to_string()))?;

        if claims.is_expired_at(self.clock.now()) {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }
}
