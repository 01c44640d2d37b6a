//! `users` table access.

use async_trait::async_trait;
use tracing::debug;

use super::{DbPool, UserStore};
use crate::error::{AppError, AppResult, EMAIL_TAKEN};
use crate::models::User;

#[derive(Clone)]
pub struct PgUserStore {
    pool: DbPool,
}

impl PgUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, User>(
            "SELECT email, hashed_password FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert(&self, user: User) -> AppResult<User> {
        let row = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, hashed_password)
            VALUES ($1, $2)
            ON CONFLICT (email) DO NOTHING
            RETURNING email, hashed_password
            "#,
        )
        .bind(&user.email)
        .bind(&user.hashed_password)
        .fetch_optional(&self.pool)
        .await?;
        row.ok_or_else(|| {
            debug!(email = %user.email, "insert skipped: email exists");
            AppError::Conflict(EMAIL_TAKEN.to_string())
        })
    }
}
