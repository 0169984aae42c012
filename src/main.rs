//! ecoscrap-api server entry point.
//!
//! Starts the Axum HTTP server with the REST API and the static frontend.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use tracing_subscriber::EnvFilter;

use ecoscrap_api::api;
use ecoscrap_api::app_state::AppState;
use ecoscrap_api::auth::{PasswordHasher, SessionCookies};
use ecoscrap_api::config::{LogFormat, MarketConfig};
use ecoscrap_api::persistence::memory::MemoryStore;
use ecoscrap_api::persistence::postgres::PgStore;
use ecoscrap_api::persistence::{MarketStore, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = MarketConfig::from_env().context("invalid LISTEN_ADDR")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(addr = %config.listen_addr, "starting ecoscrap-api");
    if config.uses_dev_secret() {
        tracing::warn!("SECRET_KEY not set, using the development session key");
    }

    // Build persistence layer
    let store: Arc<dyn MarketStore> = if config.persistence_enabled {
        Arc::new(PgStore::connect(&config).await?)
    } else {
        tracing::warn!("persistence disabled, all data is kept in memory");
        Arc::new(MemoryStore::new())
    };

    // Credentials and sessions
    let hasher = PasswordHasher::new(config.password_hash_memory_kib)?;
    let cookies = SessionCookies::new(
        config.secret_key.as_bytes(),
        config.session_lifetime_secs,
        config.session_cookie_secure,
    )?;

    // Startup data
    if config.seed_reference_data {
        seed::seed_reference_data(store.as_ref()).await?;
    }
    if config.seed_demo_data {
        seed::seed_demo_data(store.as_ref(), &hasher).await?;
    }

    // Build application state
    let app_state = AppState::new(store, hasher, cookies);

    // Build router
    let app = api::build_app(
        &config.static_dir,
        Duration::from_secs(config.request_timeout_secs),
    )
    .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
