//! Login form, issued token and decoded token data.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The only token type this service issues.
pub const BEARER: &str = "bearer";

/// OAuth2 password-flow form. `username` carries the email.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Access token response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

impl Token {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: BEARER.to_string(),
        }
    }
}

/// Identity recovered from a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenData {
    pub email: String,
}
