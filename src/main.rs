//! ScholarHub backend
//!
//! Main application entry point

use std::time::Duration;
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};

use scholar_hub::{
    config::Settings,
    utils::logging,
    database::{create_pool, run_migrations},
    handlers::create_router,
    state::AppState,
};

const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate()?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", scholar_hub::info());

    info!("Connecting to database...");
    let pool = create_pool(&settings.database).await?;
    run_migrations(&pool).await?;

    let bind_address = settings.bind_address();
    let state = AppState::new(pool, settings);
    state.services.media.ensure_directories().await?;

    spawn_session_purge(state.clone());

    let app = create_router(state);
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {}", bind_address))?;

    info!("ScholarHub is listening on {}", bind_address);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("ScholarHub has been shut down.");
    Ok(())
}

/// Periodically drop expired sessions
fn spawn_session_purge(state: AppState) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);
        loop {
            interval.tick().await;
            if let Err(e) = state.services.auth_service.purge_expired_sessions().await {
                error!(error = %e, "Failed to purge expired sessions");
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
