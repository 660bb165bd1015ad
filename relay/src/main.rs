//! hookrelay - webhook-forwarding relay server.
//!
//! Serves two routes until SIGINT/SIGTERM:
//! - `POST /webhook-proxy` rewrites headers and forwards to the target
//! - `GET /health` reports liveness
//!
//! All behavior is driven by environment variables read once at startup.
//! A missing TARGET_BASE_URL aborts startup; the relay has nowhere to
//! forward to.

use std::fs::OpenOptions;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hookrelay::web::router;
use hookrelay::{AppState, RelayConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration comes first: the optional log file has to be part of
    // the subscriber, and a missing target must abort before serving.
    let config = RelayConfig::from_env()?;

    // Initialize structured JSON logging, duplicated into LOG_FILE when
    // one is configured. An unopenable file degrades to stdout-only.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let mut log_file_error = None;
    let file_layer = match config.log_file.as_ref() {
        Some(path) => match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_writer(Arc::new(file)),
            ),
            Err(e) => {
                log_file_error = Some((path.clone(), e));
                None
            }
        },
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .with(file_layer)
        .init();

    info!("relay_starting");

    if let Some((path, e)) = log_file_error {
        warn!(path = %path.display(), error = %e, "log_file_open_failed");
    }

    let target_url = config.target_url();
    if url::Url::parse(&target_url).is_err() {
        // Startup still proceeds; every forward will fail with a clear
        // error until the configuration is fixed.
        warn!(target_url = %target_url, "target_url_not_parseable");
    }

    info!(
        target_url = %target_url,
        resigning_enabled = config.resigning_enabled(),
        default_github_event = ?config.default_github_event,
        port = config.port,
        "config_loaded"
    );

    // One client for all outbound calls, reusing connections to the target
    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(100)
        .build()
        .context("Failed to create HTTP client")?;

    let state = AppState::new(config.clone(), client);
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "relay_listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("relay_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("relay_shutting_down");
}
