//! Authentication: register, login, password hashing, JWT.

mod handlers;
mod jwt;
mod password;
mod service;

pub use handlers::{login, me, register};
pub use jwt::{Claims, TokenConfig, TokenIssuer};
pub use password::{PasswordHasher, PasswordParams};
pub use service::AuthService;
