//! Entry point: load config, wire dependencies, and run the server.

use keyward::auth::{AuthService, PasswordHasher, TokenIssuer};
use keyward::config::{Config, StoreBackend};
use keyward::store::{self, MemoryUserStore, PgUserStore, UserStore};
use keyward::{cors_layer, create_app, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let user_store: Arc<dyn UserStore> = match config.store {
        StoreBackend::Postgres => {
            let pool = store::create_pool(&config.database_url).await?;
            store::run_migrations(&pool).await?;
            Arc::new(PgUserStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory user store; users are lost on restart");
            Arc::new(MemoryUserStore::new())
        }
    };

    let hasher = PasswordHasher::new(config.password)?;
    let tokens = TokenIssuer::new(&config.token);
    let state = AppState::new(AuthService::new(user_store, hasher, tokens));

    let app = create_app(state).layer(cors_layer(&config.cors_origins));

    tracing::info!(addr = %config.server_addr, store = ?config.store, "listening");
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
