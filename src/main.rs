//! Auction Watcher - auction service that closes auctions on their own
//!
//! Auctions are stamped with a deadline when created; a background watcher
//! sweeps the store and completes every active auction past its deadline.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auction_watcher::api::create_router;
use auction_watcher::{AppState, Config, TimeoutWatcher};

/// Main entry point for the auction service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration from environment variables
/// 3. Create the store, repository and sweep executor
/// 4. Start the auction timeout watcher
/// 5. Start HTTP server on configured port
/// 6. On SIGINT/SIGTERM, stop the watcher and drain the server
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auction_watcher=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Auction Watcher");

    // A bad duration must stop the process before any watcher exists
    let config = Config::from_env().context("invalid configuration")?;
    info!(
        "Configuration loaded: auction_timeout={}s, auction_verify={:?}, port={}",
        config.watcher.lifetime_secs(),
        config.watcher.poll_interval(),
        config.server_port
    );

    let state = AppState::from_config(&config);

    let watcher = TimeoutWatcher::new(state.sweeper.clone(), config.watcher.poll_interval());
    let watcher_handle = watcher.start()?;
    info!("Auction timeout watcher started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(watcher.cancellation_token()))
        .await
        .context("server error")?;

    if let Err(e) = watcher_handle.await {
        warn!(error = %e, "Timeout watcher did not shut down cleanly");
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then cancels the watcher.
async fn shutdown_signal(watcher_cancel: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    watcher_cancel.cancel();
    warn!("Timeout watcher cancelled");
}
