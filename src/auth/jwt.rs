//! JWT issue and validation.

use crate::error::{AppError, AppResult};
use crate::models::TokenData;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>, // email
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
}

/// Signing settings, injected from [`crate::Config`].
#[derive(Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    pub ttl: Duration,
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            algorithm: config.algorithm,
            ttl: config.ttl,
        }
    }

    /// Mint a token for `subject` expiring `ttl` from now.
    pub fn issue(&self, subject: &str) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: Some(subject.to_string()),
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
        };
        self.sign(&claims)
    }

    pub fn sign(&self, claims: &Claims) -> AppResult<String> {
        encode(&Header::new(self.algorithm), claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("sign token: {}", e)))
    }

    /// Verify signature and expiry, then extract the subject.
    /// Every failure maps to the same Unauthorized error.
    pub fn validate(&self, token: &str) -> AppResult<TokenData> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            debug!(reason = %e, "token rejected");
            AppError::invalid_credentials()
        })?;
        let email = data.claims.sub.ok_or_else(|| {
            debug!("token rejected: no subject");
            AppError::invalid_credentials()
        })?;
        Ok(TokenData { email })
    }
}
