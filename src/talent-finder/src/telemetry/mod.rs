//! Run-scoped API efficiency counters.
//!
//! A [`Telemetry`] handle is created once per run and passed explicitly into
//! the cache, discovery and ranking. Counters are atomics, so a shared
//! reference is enough to record events.

mod counter;
mod snapshot;

pub use counter::{Counter, DiscardReason};
pub use snapshot::{CounterValue, TelemetrySnapshot};

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for a single run, reset only by creating a new handle.
#[derive(Debug)]
pub struct Telemetry {
    counts: [AtomicU64; Counter::COUNT],
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl Telemetry {
    /// Creates a handle with every counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            counts: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }

    /// Increments a counter by one.
    pub fn inc(&self, counter: Counter) {
        self.add(counter, 1);
    }

    /// Increments a counter by `amount`.
    pub fn add(&self, counter: Counter, amount: u64) {
        self.counts[counter.index()].fetch_add(amount, Ordering::Relaxed);
    }

    /// Current value of a counter.
    #[must_use]
    pub fn get(&self, counter: Counter) -> u64 {
        self.counts[counter.index()].load(Ordering::Relaxed)
    }

    /// Snapshots the given counters, in the given order.
    #[must_use]
    pub fn snapshot(&self, counters: &[Counter]) -> TelemetrySnapshot {
        TelemetrySnapshot::new(
            counters
                .iter()
                .map(|&counter| CounterValue {
                    name: counter.name(),
                    value: self.get(counter),
                })
                .collect(),
        )
    }

    /// Snapshot of the discovery-phase counters.
    #[must_use]
    pub fn discovery_summary(&self) -> TelemetrySnapshot {
        self.snapshot(&Counter::DISCOVERY)
    }

    /// Snapshot of the ranking-phase counters.
    #[must_use]
    pub fn ranking_summary(&self) -> TelemetrySnapshot {
        self.snapshot(&Counter::RANKING)
    }

    /// Snapshot of every counter.
    #[must_use]
    pub fn full_snapshot(&self) -> TelemetrySnapshot {
        self.snapshot(&Counter::ALL)
    }
}
