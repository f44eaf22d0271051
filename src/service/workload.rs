//! Randomized Workload Simulator
//!
//! Produces variable-latency, occasionally failing work so the tracing and error
//! counting paths have something to show.

use std::time::Duration;

use parking_lot::Mutex;
use rand::distr::{weighted::WeightedIndex, Distribution};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info_span, Instrument};

use crate::error::WorkloadError;

/// Candidate delays in seconds
pub const SLEEP_TIMES_SECS: [f64; 7] = [0.1, 0.2, 0.3, 0.5, 1.0, 2.0, 5.0];

/// Relative selection weight of each delay, favoring short ones
pub const SLEEP_WEIGHTS: [f64; 7] = [0.7, 0.1, 0.1, 0.05, 0.03, 0.01, 0.01];

/// Chance that a unit of work fails after sleeping
pub const FAILURE_PROBABILITY: f64 = 0.1;

// == Work Plan ==
/// The outcome of one draw, decided before any waiting happens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkPlan {
    pub sleep: Duration,
    pub fail: bool,
}

// == Workload Simulator ==
#[derive(Debug)]
pub struct WorkloadSimulator<R = StdRng> {
    rng: Mutex<R>,
    delays: Vec<Duration>,
    weights: WeightedIndex<f64>,
}

impl WorkloadSimulator<StdRng> {
    /// Creates a simulator seeded from OS entropy.
    pub fn new() -> Result<Self, WorkloadError> {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Creates a simulator whose draws are reproducible for a given seed.
    pub fn seeded(seed: u64) -> Result<Self, WorkloadError> {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> WorkloadSimulator<R> {
    pub fn with_rng(rng: R) -> Result<Self, WorkloadError> {
        Ok(Self {
            rng: Mutex::new(rng),
            delays: SLEEP_TIMES_SECS
                .iter()
                .map(|secs| Duration::from_secs_f64(*secs))
                .collect(),
            weights: WeightedIndex::new(SLEEP_WEIGHTS)?,
        })
    }

    // == Plan ==
    /// Draws a delay by weight, then a failure with probability 0.1.
    pub fn plan(&self) -> WorkPlan {
        let mut rng = self.rng.lock();
        let index = self.weights.sample(&mut *rng);
        let fail = rng.random_bool(FAILURE_PROBABILITY);

        WorkPlan {
            sleep: self.delays[index],
            fail,
        }
    }

    // == Simulate Work ==
    /// Sleeps for a drawn delay inside a `random sleep` span, then fails one
    /// time in ten.
    ///
    /// Returns the delay that was slept on success.
    pub async fn simulate_work(&self) -> Result<Duration, WorkloadError> {
        let plan = self.plan();

        let span = info_span!(
            "random sleep",
            operation.sleep_time = plan.sleep.as_secs_f64()
        );
        tokio::time::sleep(plan.sleep).instrument(span).await;

        if plan.fail {
            debug!(sleep_time = plan.sleep.as_secs_f64(), "Simulated work failed");
            return Err(WorkloadError::SimulatedFailure);
        }
        Ok(plan.sleep)
    }
}
