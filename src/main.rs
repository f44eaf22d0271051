//! Demo API - an observable demo service
//!
//! Serves `/hello-world` and `/cached-result` with tracing, cache metrics and
//! per-route error counting.

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use demo_api::telemetry::{init_tracing, Exporter};
use demo_api::{create_router, spawn_cleanup_task, spawn_metrics_task, AppState, Config};

/// Command line overrides; everything else comes from the environment.
#[derive(Parser, Debug)]
#[command(name = "demo-api")]
#[command(version)]
#[command(about = "Observable demo service with a read-through TTL cache")]
struct Cli {
    /// Listen host (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Listen port (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Route prefix (overrides ROOT_PATH)
    #[arg(long)]
    root_path: Option<String>,
}

/// Main entry point for the demo service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables and CLI overrides
/// 3. Create cache, simulator and meter
/// 4. Start background TTL cleanup and metrics export tasks
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured address
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing().context("failed to install tracing subscriber")?;

    info!("Starting demo service");

    let mut config = Config::from_env();
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(root_path) = cli.root_path {
        config.root_path = root_path;
    }
    info!(
        "Configuration loaded: capacity={}, ttl={:?}, compute_delay={:?}, cleanup_interval={:?}, metrics_interval={:?}",
        config.cache_capacity,
        config.cache_ttl,
        config.compute_delay,
        config.cleanup_interval,
        config.metrics_interval
    );

    let state = AppState::from_config(&config).context("failed to initialize service state")?;
    info!("Cache store initialized");

    let cleanup_handle = spawn_cleanup_task(state.cache.clone(), config.cleanup_interval);
    let metrics_handle = spawn_metrics_task(
        state.meter.clone(),
        Exporter::from_config(&config),
        config.service_name.clone(),
        config.metrics_interval,
    );
    info!("Background tasks started");

    let app = create_router(state, &config.root_path);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;
    let addr: SocketAddr = listener.local_addr()?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(vec![cleanup_handle, metrics_handle]))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the background tasks and allows graceful shutdown.
async fn shutdown_signal(handles: Vec<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to install SIGTERM handler");
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

    for handle in handles {
        handle.abort();
    }
    warn!("Background tasks aborted");
}
