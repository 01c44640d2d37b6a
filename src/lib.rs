//! User registration and login backend built with Rust.
//!
//! Registers users with argon2-hashed passwords, authenticates email+password
//! logins, and issues stateless HMAC-signed bearer tokens that resolve back to
//! the stored user.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod store;

pub use auth::AuthService;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use handlers::http::AppState;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use handlers::http;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the API router (auth, health). Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    let auth_routes = axum::Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/users/me", get(auth::me));

    let api = axum::Router::new()
        .route("/health", get(http::health))
        .nest("/auth", auth_routes);

    axum::Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the browser frontend: listed origins, credentials allowed.
/// Unparseable origins are skipped with a warning.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}
