//! Bearer-token extractor for protected routes.

use axum::{extract::FromRequestParts, http::request::Parts, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use tracing::debug;

use crate::error::AppError;
use crate::handlers::http::AppState;
use crate::models::User;

/// Extractor: the user named by a valid `Authorization: Bearer` token.
/// A missing or malformed header is rejected like any other invalid token.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|e| {
                debug!(reason = %e, "missing or malformed Authorization header");
                AppError::invalid_credentials()
            })?;
        let user = state
            .auth_service()
            .resolve_current_user(bearer.token())
            .await?;
        Ok(CurrentUser(user))
    }
}
