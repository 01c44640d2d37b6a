//! Credential store: user records keyed by email.

mod memory;
mod pool;
mod postgres;

pub use memory::MemoryUserStore;
pub use pool::{create_pool, run_migrations, DbPool};
pub use postgres::PgUserStore;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::User;

/// Persistence for [`User`] records.
///
/// Lookups are exact-match on the stored email (no case folding).
/// `insert` is the only place uniqueness is decided: a duplicate email
/// fails with [`crate::AppError::Conflict`] from that single call.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn insert(&self, user: User) -> AppResult<User>;
}
