//! In-process metric registry.
//!
//! Counters are incremented inline by request code; observable counters are read
//! through a callback only when the meter is collected.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::Serialize;

/// Attribute set identifying one time series of a metric.
pub type Attributes = BTreeMap<String, String>;

fn to_attributes(pairs: &[(&str, &str)]) -> Attributes {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Counter,
    ObservableCounter,
}

// == Metric Point ==
/// One observed value of one series at collection time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricPoint {
    pub name: String,
    pub description: String,
    pub unit: String,
    pub kind: MetricKind,
    pub attributes: Attributes,
    pub value: u64,
}

// == Counter ==
/// Monotonically increasing counter, one running total per attribute set.
#[derive(Debug)]
pub struct Counter {
    name: String,
    description: String,
    unit: String,
    series: Mutex<BTreeMap<Attributes, u64>>,
}

impl Counter {
    fn new(name: &str, description: &str, unit: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            unit: unit.to_string(),
            series: Mutex::new(BTreeMap::new()),
        }
    }

    /// Adds `value` to the series identified by `attributes`.
    pub fn add(&self, value: u64, attributes: &[(&str, &str)]) {
        let mut series = self.series.lock();
        let total = series.entry(to_attributes(attributes)).or_insert(0);
        *total = total.saturating_add(value);
    }

    /// Current total for one attribute set, 0 if never incremented.
    pub fn value(&self, attributes: &[(&str, &str)]) -> u64 {
        self.series
            .lock()
            .get(&to_attributes(attributes))
            .copied()
            .unwrap_or(0)
    }

    fn points(&self) -> Vec<MetricPoint> {
        self.series
            .lock()
            .iter()
            .map(|(attributes, value)| MetricPoint {
                name: self.name.clone(),
                description: self.description.clone(),
                unit: self.unit.clone(),
                kind: MetricKind::Counter,
                attributes: attributes.clone(),
                value: *value,
            })
            .collect()
    }
}

type Callback = Box<dyn Fn() -> u64 + Send + Sync>;

// == Observable Counter ==
/// Counter whose value is sampled from a callback at collection time.
pub struct ObservableCounter {
    name: String,
    description: String,
    unit: String,
    callback: Callback,
}

impl fmt::Debug for ObservableCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableCounter")
            .field("name", &self.name)
            .field("unit", &self.unit)
            .finish_non_exhaustive()
    }
}

impl ObservableCounter {
    fn observe(&self) -> MetricPoint {
        MetricPoint {
            name: self.name.clone(),
            description: self.description.clone(),
            unit: self.unit.clone(),
            kind: MetricKind::ObservableCounter,
            attributes: Attributes::new(),
            value: (self.callback)(),
        }
    }
}

// == Meter ==
/// Registry of every instrument the service reports.
#[derive(Debug, Default)]
pub struct Meter {
    counters: RwLock<Vec<Arc<Counter>>>,
    observables: RwLock<Vec<ObservableCounter>>,
}

impl Meter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a counter, or returns the existing one with the same name.
    pub fn create_counter(&self, name: &str, description: &str, unit: &str) -> Arc<Counter> {
        let mut counters = self.counters.write();
        if let Some(existing) = counters.iter().find(|c| c.name == name) {
            return Arc::clone(existing);
        }

        let counter = Arc::new(Counter::new(name, description, unit));
        counters.push(Arc::clone(&counter));
        counter
    }

    /// Registers a callback-driven counter. Later registrations under the same
    /// name replace earlier ones.
    pub fn create_observable_counter<F>(&self, name: &str, description: &str, unit: &str, callback: F)
    where
        F: Fn() -> u64 + Send + Sync + 'static,
    {
        let observable = ObservableCounter {
            name: name.to_string(),
            description: description.to_string(),
            unit: unit.to_string(),
            callback: Box::new(callback),
        };

        let mut observables = self.observables.write();
        observables.retain(|o| o.name != name);
        observables.push(observable);
    }

    // == Collect ==
    /// Samples every observable counter and snapshots every counter series.
    pub fn collect(&self) -> Vec<MetricPoint> {
        let mut points: Vec<MetricPoint> = self
            .observables
            .read()
            .iter()
            .map(ObservableCounter::observe)
            .collect();

        for counter in self.counters.read().iter() {
            points.extend(counter.points());
        }
        points
    }
}
