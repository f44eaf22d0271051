//! Synthetic Load Generator
//!
//! Workers that keep hitting the demo endpoints with a per-worker `user-id`
//! header and a random pause between requests.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};
use uuid::{Builder, Uuid};

/// Base URL used when neither `--url` nor `DEMO_SERVICE_URL` is given
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Header carrying the simulated user's identity
pub const USER_ID_HEADER: &str = "user-id";

/// Worker count used when neither `--workers` nor `WORKER_COUNT` is given
pub const DEFAULT_WORKERS: usize = 2;

// == Settings ==
#[derive(Debug, Clone)]
pub struct LoadSettings {
    /// Full URLs; each request picks one at random
    pub targets: Vec<String>,
    pub min_wait: Duration,
    pub max_wait: Duration,
    /// Requests per worker, None to run until stopped
    pub requests: Option<u64>,
    /// Base seed; worker `n` uses `seed + n`
    pub seed: Option<u64>,
}

/// Both demo endpoints under `base`.
pub fn default_targets(base: &str) -> Vec<String> {
    let base = base.trim_end_matches('/');
    vec![format!("{base}/hello-world"), format!("{base}/cached-result")]
}

/// Explicit URLs win, then `DEMO_SERVICE_URL` as a single target, then both
/// demo endpoints on localhost.
pub fn resolve_targets(urls: Vec<String>, env_url: Option<String>) -> Vec<String> {
    if !urls.is_empty() {
        return urls;
    }
    match env_url.filter(|url| !url.trim().is_empty()) {
        Some(url) => vec![url],
        None => default_targets(DEFAULT_BASE_URL),
    }
}

/// Worker count from the CLI, else `WORKER_COUNT`, else 2. Never zero.
pub fn resolve_workers(cli: Option<usize>, env_count: Option<String>) -> usize {
    cli.or_else(|| env_count.and_then(|v| v.trim().parse().ok()))
        .filter(|count| *count > 0)
        .unwrap_or(DEFAULT_WORKERS)
}

/// A version 4 UUID drawn from `rng`, so seeded runs repeat their user ids.
pub fn user_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    Builder::from_random_bytes(rng.random()).into_uuid().to_string()
}

/// Uniform pause in `[min, max]` at millisecond resolution. An inverted range
/// collapses to `min`.
pub fn next_wait<R: Rng + ?Sized>(rng: &mut R, min: Duration, max: Duration) -> Duration {
    let (lo, hi) = (min.as_millis() as u64, max.as_millis() as u64);
    if hi <= lo {
        return min;
    }
    Duration::from_millis(rng.random_range(lo..=hi))
}

// == Worker Report ==
/// Outcome totals for one worker or a whole run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkerReport {
    pub sent: u64,
    /// 2xx responses
    pub succeeded: u64,
    /// Non-2xx responses and transport errors
    pub failed: u64,
}

impl WorkerReport {
    fn merge(&mut self, other: WorkerReport) {
        self.sent += other.sent;
        self.succeeded += other.succeeded;
        self.failed += other.failed;
    }
}

// == Run Worker ==
/// Sends requests until the per-worker limit is reached.
///
/// Request errors are logged and counted; they never end the loop.
pub async fn run_worker<R: Rng + Send>(
    worker: usize,
    user: String,
    client: reqwest::Client,
    settings: Arc<LoadSettings>,
    mut rng: R,
) -> WorkerReport {
    let mut report = WorkerReport::default();
    info!(worker, user = %user, "Load worker started");

    while settings.requests.map_or(true, |limit| report.sent < limit) {
        let Some(target) = settings.targets.choose(&mut rng).cloned() else {
            warn!(worker, "No targets configured");
            break;
        };

        report.sent += 1;
        match client.get(&target).header(USER_ID_HEADER, &user).send().await {
            Ok(response) if response.status().is_success() => {
                report.succeeded += 1;
                debug!(worker, url = %target, status = %response.status(), "Request completed");
            }
            Ok(response) => {
                report.failed += 1;
                info!(worker, url = %target, status = %response.status(), "Request failed");
            }
            Err(err) => {
                report.failed += 1;
                warn!(worker, url = %target, error = %err, "Request error");
            }
        }

        let wait = next_wait(&mut rng, settings.min_wait, settings.max_wait);
        tokio::time::sleep(wait).await;
    }

    info!(worker, sent = report.sent, "Load worker finished");
    report
}

// == Run ==
/// Runs `workers` workers concurrently and sums their reports.
pub async fn run(client: reqwest::Client, settings: LoadSettings, workers: usize) -> WorkerReport {
    let settings = Arc::new(settings);

    let handles: Vec<_> = (0..workers)
        .map(|worker| {
            let (user, rng) = match settings.seed {
                Some(seed) => {
                    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(worker as u64));
                    (user_id(&mut rng), rng)
                }
                None => (Uuid::new_v4().to_string(), StdRng::from_os_rng()),
            };
            tokio::spawn(run_worker(
                worker,
                user,
                client.clone(),
                Arc::clone(&settings),
                rng,
            ))
        })
        .collect();

    let mut total = WorkerReport::default();
    for handle in handles {
        match handle.await {
            Ok(report) => total.merge(report),
            Err(err) => warn!(error = %err, "Load worker panicked or was cancelled"),
        }
    }
    total
}
