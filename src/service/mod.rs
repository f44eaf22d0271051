//! Service Module
//!
//! The work behind the two demo endpoints: a read-through cache and a
//! randomized workload.

mod read_through;
mod workload;

pub use read_through::{simulate_computation, ReadThrough, COMPUTED_RESULT, RESULT_KEY};
pub use workload::{
    WorkPlan, WorkloadSimulator, FAILURE_PROBABILITY, SLEEP_TIMES_SECS, SLEEP_WEIGHTS,
};
