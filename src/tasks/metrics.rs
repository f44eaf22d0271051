//! Metrics Export Task
//!
//! Periodically collects the meter and hands the batch to an exporter. This is
//! the only thing that triggers the observable counter callbacks.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::telemetry::{Exporter, Meter, MetricBatch};

/// Spawns a background task exporting `meter` every `interval`.
///
/// Export failures are logged and the next tick tries again; they never stop
/// the task. Returns the handle used to abort it on shutdown.
pub fn spawn_metrics_task(
    meter: Arc<Meter>,
    exporter: Exporter,
    service: String,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting metrics export task with interval of {:?}", interval);

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick completes immediately; skip it so the first export
        // happens one interval after startup
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let batch = MetricBatch::new(service.clone(), meter.collect());
            let points = batch.points.len();

            match exporter.export(&batch).await {
                Ok(()) => debug!("Exported {} metric points", points),
                Err(err) => warn!(error = %err, "Metrics export failed"),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_metrics_task_samples_periodically() {
        let meter = Arc::new(Meter::new());
        let samples = Arc::new(AtomicU64::new(0));
        let counted = Arc::clone(&samples);
        meter.create_observable_counter("samples", "", "1", move || {
            counted.fetch_add(1, Ordering::SeqCst)
        });

        let handle = spawn_metrics_task(
            Arc::clone(&meter),
            Exporter::Log,
            "demo-api".to_string(),
            Duration::from_secs(10),
        );

        tokio::time::sleep(Duration::from_secs(35)).await;
        handle.abort();

        assert_eq!(samples.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_export_failure_does_not_stop_task() {
        let meter = Arc::new(Meter::new());
        let samples = Arc::new(AtomicU64::new(0));
        let counted = Arc::clone(&samples);
        meter.create_observable_counter("samples", "", "1", move || {
            counted.fetch_add(1, Ordering::SeqCst)
        });

        // nothing listens on the discard port, so every push fails
        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap();
        let exporter = Exporter::with_client(client, "http://127.0.0.1:9/metrics");

        let handle = spawn_metrics_task(
            Arc::clone(&meter),
            exporter,
            "demo-api".to_string(),
            Duration::from_millis(100),
        );

        tokio::time::sleep(Duration::from_millis(800)).await;
        handle.abort();

        assert!(samples.load(Ordering::SeqCst) >= 2);
    }
}
