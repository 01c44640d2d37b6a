//! Auth HTTP handlers: register, login, current user.

use axum::{extract::State, Form, Json};
use validator::Validate;

use crate::error::AppError;
use crate::handlers::http::AppState;
use crate::middleware::auth::CurrentUser;
use crate::models::{LoginForm, Token, UserCreate, UserResponse};

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<UserCreate>,
) -> Result<Json<UserResponse>, AppError> {
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;
    let user = state.auth_service().register(body).await?;
    Ok(Json(UserResponse::from(&user)))
}

/// POST /api/v1/auth/login (form-encoded `username`, `password`)
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<Token>, AppError> {
    let token = state.auth_service().login(&form).await?;
    Ok(Json(token))
}

/// GET /api/v1/auth/users/me
pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}
