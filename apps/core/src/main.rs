// MindBridge service entry point

use anyhow::Context;
use mindbridge_core::actors::transcriber::TranscriberHandle;
use mindbridge_core::actors::whisper::WhisperHttpBackend;
use mindbridge_core::api::{self, AppState};
use mindbridge_core::config::{ServiceConfig, ServiceProfile};
use mindbridge_core::{database, preflight, telemetry};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const RATE_LIMIT_PRUNE_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenv::dotenv().ok();

    let config = ServiceConfig::from_env().context("Failed to load configuration")?;
    telemetry::init(&config).context("Failed to initialize logging")?;
    info!(
        profile = %config.profile,
        address = %config.bind_address(),
        "Starting MindBridge"
    );

    let pool = match config.profile {
        ServiceProfile::Agent => None,
        ServiceProfile::Backend | ServiceProfile::Combined => Some(
            database::init_db(&config.database_url)
                .await
                .context("Failed to initialize database")?,
        ),
    };

    let whisper = WhisperHttpBackend::new(&config.whisper_service_url, config.whisper_timeout())
        .context("Invalid WHISPER_SERVICE_URL")?;
    let speech = Arc::new(TranscriberHandle::new(
        Arc::new(whisper),
        // queueing on top of the HTTP timeout
        config.whisper_timeout() * 2,
    ));

    let report = preflight::run_connection_checks(pool.as_ref(), speech.as_ref()).await;
    if !report.all_passed {
        warn!("Starting with failing checks: {}", report.summary);
    }

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address()))?;

    let state = AppState::new(pool, speech, config);
    let pruner = state.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(RATE_LIMIT_PRUNE_INTERVAL);
        loop {
            ticker.tick().await;
            pruner.prune_rate_limits();
        }
    });

    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("MindBridge stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
