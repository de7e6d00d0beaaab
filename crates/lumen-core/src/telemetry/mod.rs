// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Provides the telemetry contracts of the platform layer.
//!
//! This module defines the abstract "what" of telemetry: metric identifiers and
//! values, and the [`CounterSink`] capability handed to input handlers.
//! `lumen-telemetry` provides the registry that stores them.

pub mod metrics;

pub use self::metrics::{Metric, MetricId, MetricType, MetricValue, MetricsError, MetricsResult};

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};

/// Well-known metric identifiers.
pub mod ids {
    use super::MetricId;

    /// Incremented once per pointer polling tick.
    pub fn mouse_events() -> MetricId {
        MetricId::new("input", "mouse_events")
    }

    /// Incremented once per keyboard polling tick.
    pub fn keyboard_events() -> MetricId {
        MetricId::new("input", "keyboard_events")
    }

    /// Number of input states folded by the frame thread.
    pub fn states_folded() -> MetricId {
        MetricId::new("input", "states_folded")
    }

    /// Input states waiting for the frame thread when a frame starts.
    pub fn pending_states() -> MetricId {
        MetricId::new("input", "pending_states")
    }
}

/// A monotonically increasing counter, passed to components as a capability.
pub trait CounterSink: Send + Sync + Debug {
    /// Adds `amount` to the counter.
    fn add(&self, amount: u64);

    /// Adds one to the counter.
    fn increment(&self) {
        self.add(1);
    }
}

/// A standalone atomic counter.
#[derive(Debug, Default)]
pub struct AtomicCounter {
    value: AtomicU64,
}

impl AtomicCounter {
    /// Creates a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current value.
    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

impl CounterSink for AtomicCounter {
    fn add(&self, amount: u64) {
        self.value.fetch_add(amount, Ordering::Relaxed);
    }
}

/// A counter that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCounter;

impl CounterSink for NullCounter {
    fn add(&self, _amount: u64) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn atomic_counter_counts_across_threads() {
        let counter = Arc::new(AtomicCounter::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let counter = counter.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        counter.increment();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("thread panicked");
        }
        assert_eq!(counter.get(), 400);
    }
}
