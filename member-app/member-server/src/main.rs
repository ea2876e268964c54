use anyhow::Context;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tracing::{debug, info};

use member_api::{build_router, AppState};
use member_infrastructure::open_store;
use member_shared::config::AppConfig;

const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize telemetry
    let _log_guard = member_shared::telemetry::init_telemetry(&config.log)?;

    info!("Member Server starting ({})...", config.app.env);

    // Member store
    let store = open_store(&config.database).await?;

    // Create App State
    let state = AppState::new(store, config.clone())?;

    // Expired sessions are dropped lazily on lookup; this sweeps the rest
    let sessions = state.sessions.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_PURGE_INTERVAL);
        loop {
            ticker.tick().await;
            let purged = sessions.purge_expired();
            if purged > 0 {
                debug!("Purged {} expired sessions", purged);
            }
        }
    });

    // Build router
    let app = build_router(state).layer(
        CorsLayer::new()
            .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
            .allow_headers([axum::http::header::CONTENT_TYPE]),
    );

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Member Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
