//! Load generator for the demo service.
//!
//! Runs a few concurrent workers that keep requesting the demo endpoints until
//! the per-worker limit is reached or Ctrl+C is pressed.

use std::env;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use demo_api::loadgen::{self, resolve_targets, resolve_workers, LoadSettings};
use demo_api::telemetry::init_tracing;

/// Synthetic traffic for the demo service
#[derive(Parser, Debug)]
#[command(name = "loadgen")]
#[command(version)]
#[command(about = "Sends a steady stream of requests to the demo service")]
struct Cli {
    /// Target URL, repeatable. Defaults to DEMO_SERVICE_URL or both demo
    /// endpoints on localhost:8080
    #[arg(long = "url")]
    urls: Vec<String>,

    /// Concurrent workers. Defaults to WORKER_COUNT or 2
    #[arg(short, long)]
    workers: Option<usize>,

    /// Shortest pause between requests in milliseconds
    #[arg(long, default_value_t = 0)]
    min_wait_ms: u64,

    /// Longest pause between requests in milliseconds
    #[arg(long, default_value_t = 1000)]
    max_wait_ms: u64,

    /// Requests per worker; runs until interrupted when omitted
    #[arg(long)]
    requests: Option<u64>,

    /// Seed for reproducible targets, waits and user ids
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing().context("failed to install tracing subscriber")?;

    let workers = resolve_workers(cli.workers, env::var("WORKER_COUNT").ok());
    let settings = LoadSettings {
        targets: resolve_targets(cli.urls, env::var("DEMO_SERVICE_URL").ok()),
        min_wait: Duration::from_millis(cli.min_wait_ms),
        max_wait: Duration::from_millis(cli.max_wait_ms),
        requests: cli.requests,
        seed: cli.seed,
    };
    info!(workers, targets = ?settings.targets, "Starting load generator");

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("failed to build HTTP client")?;

    tokio::select! {
        report = loadgen::run(client, settings, workers) => {
            info!(
                sent = report.sent,
                succeeded = report.succeeded,
                failed = report.failed,
                "Load generation finished"
            );
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl+C")?;
            info!("Received Ctrl+C, stopping load generator");
        }
    }

    Ok(())
}
