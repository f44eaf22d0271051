//! Metric exporters.
//!
//! A batch is whatever one collection of the meter produced, stamped with the
//! service name and collection time.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::error::ExportError;
use crate::telemetry::MetricPoint;

// == Metric Batch ==
#[derive(Debug, Clone, Serialize)]
pub struct MetricBatch {
    pub service: String,
    pub timestamp: DateTime<Utc>,
    pub points: Vec<MetricPoint>,
}

impl MetricBatch {
    pub fn new(service: impl Into<String>, points: Vec<MetricPoint>) -> Self {
        Self {
            service: service.into(),
            timestamp: Utc::now(),
            points,
        }
    }
}

// == Exporter ==
/// Destination for collected metric batches.
#[derive(Debug, Clone)]
pub enum Exporter {
    /// Emits one structured log event per point
    Log,
    /// POSTs the batch as JSON to a collector endpoint
    Http {
        client: reqwest::Client,
        endpoint: String,
    },
}

impl Exporter {
    /// Chooses the HTTP exporter when an endpoint is configured, else logging.
    pub fn from_config(config: &Config) -> Self {
        match &config.metrics_endpoint {
            Some(endpoint) => Self::http(endpoint.clone()),
            None => Self::Log,
        }
    }

    pub fn http(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self::Http {
            client,
            endpoint: endpoint.into(),
        }
    }

    // == Export ==
    pub async fn export(&self, batch: &MetricBatch) -> Result<(), ExportError> {
        match self {
            Self::Log => {
                for point in &batch.points {
                    info!(
                        service = %batch.service,
                        metric = %point.name,
                        unit = %point.unit,
                        value = point.value,
                        attributes = ?point.attributes,
                        "Metric observation"
                    );
                }
                Ok(())
            }
            Self::Http { client, endpoint } => {
                let response = client.post(endpoint).json(batch).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(ExportError::Rejected(status));
                }
                Ok(())
            }
        }
    }
}
