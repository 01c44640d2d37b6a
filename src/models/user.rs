//! User record, registration input and the public user shape.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use validator::Validate;

/// Stored user record. Immutable once inserted.
#[derive(Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub email: String,
    pub hashed_password: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("email", &self.email)
            .field("hashed_password", &"<redacted>")
            .finish()
    }
}

/// Registration input. The plaintext password lives only for the duration of the call.
#[derive(Deserialize, Validate)]
pub struct UserCreate {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCreate")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Public-facing user shape returned by the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self { email: user.email }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            email: "a@b.com".to_string(),
            hashed_password: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        }
    }

    #[test]
    fn response_shape_has_only_email() {
        let json = serde_json::to_value(UserResponse::from(&user())).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["email"], "a@b.com");
    }

    #[test]
    fn debug_redacts_secrets() {
        let rendered = format!("{:?}", user());
        assert!(!rendered.contains("argon2id"));

        let input = UserCreate {
            email: "a@b.com".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(!format!("{:?}", input).contains("hunter2"));
    }

    #[test]
    fn create_validation() {
        let ok = UserCreate {
            email: "u@x.com".to_string(),
            password: "pw123".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad_email = UserCreate {
            email: "not-an-email".to_string(),
            password: "pw123".to_string(),
        };
        assert!(bad_email.validate().is_err());

        let empty_password = UserCreate {
            email: "u@x.com".to_string(),
            password: String::new(),
        };
        assert!(empty_password.validate().is_err());
    }
}
