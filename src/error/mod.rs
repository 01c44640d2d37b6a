//! Application error types for robust error handling.

use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Detail returned for every token/credential validation failure on protected routes.
pub const INVALID_CREDENTIALS: &str = "Could not validate credentials";
/// Detail returned when login fails.
pub const INCORRECT_LOGIN: &str = "Incorrect email or password";
/// Detail returned when registering an email that already exists.
pub const EMAIL_TAKEN: &str = "Email already registered";

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// The uniform rejection for anything wrong with a presented bearer token.
    pub fn invalid_credentials() -> Self {
        AppError::Unauthorized(INVALID_CREDENTIALS.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Config(_) | AppError::Db(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Config(msg) => msg.clone(),
            AppError::Db(e) => {
                tracing::error!(error = %e, "database error");
                "Internal server error".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "internal error");
                "Internal server error".to_string()
            }
            AppError::Validation(msg) | AppError::Conflict(msg) | AppError::Unauthorized(msg) => {
                msg.clone()
            }
        };

        let mut response = (status, Json(json!({ "detail": message }))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

pub type AppResult<T> = Result<T, AppError>;
