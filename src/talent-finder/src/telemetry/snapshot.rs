//! Point-in-time copies of telemetry counters.

use serde::Serialize;

/// A single counter reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterValue {
    /// Counter name.
    pub name: &'static str,
    /// Value at snapshot time.
    pub value: u64,
}

/// Ordered counter readings taken after a phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TelemetrySnapshot {
    entries: Vec<CounterValue>,
}

impl TelemetrySnapshot {
    pub(super) fn new(entries: Vec<CounterValue>) -> Self {
        Self { entries }
    }

    /// Value of a counter by name, if it is part of this snapshot.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.value)
    }

    /// Readings in snapshot order.
    #[must_use]
    pub fn entries(&self) -> &[CounterValue] {
        &self.entries
    }
}
