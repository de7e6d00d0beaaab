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

//! Service owning the metrics registry and its periodic report.

use crate::metrics::registry::MetricsRegistry;
use lumen_core::telemetry::{Metric, MetricValue};
use serde::Serialize;
use std::time::{Duration, Instant};

/// A serializable view of one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSnapshot {
    /// The formatted metric identifier.
    pub id: String,
    /// The unit of measurement.
    pub unit: String,
    /// The value at snapshot time.
    pub value: f64,
}

/// Owns the metrics registry and logs a summary at a fixed interval.
#[derive(Debug)]
pub struct TelemetryService {
    metrics: MetricsRegistry,
    last_report: Instant,
    report_interval: Duration,
}

impl TelemetryService {
    /// Creates a service that reports every `report_interval`.
    pub fn new(report_interval: Duration) -> Self {
        Self {
            metrics: MetricsRegistry::new(),
            last_report: Instant::now(),
            report_interval,
        }
    }

    /// Should be called once per frame. Logs the summary when the interval has
    /// elapsed and returns whether it did.
    pub fn tick(&mut self) -> bool {
        if self.last_report.elapsed() < self.report_interval {
            return false;
        }
        self.last_report = Instant::now();
        for snapshot in self.snapshot() {
            log::debug!("[telemetry] {} = {} {}", snapshot.id, snapshot.value, snapshot.unit);
        }
        true
    }

    /// Returns the current value of every metric, sorted by identifier.
    pub fn snapshot(&self) -> Vec<MetricSnapshot> {
        self.metrics.all_metrics().into_iter().map(to_snapshot).collect()
    }

    /// Returns the current value of every metric in `namespace`.
    pub fn namespace_snapshot(&self, namespace: &str) -> Vec<MetricSnapshot> {
        self.metrics
            .namespace_metrics(namespace)
            .into_iter()
            .map(to_snapshot)
            .collect()
    }

    /// Serializes [`snapshot`](Self::snapshot) as JSON.
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.snapshot())
    }

    /// Returns a reference to the metrics registry.
    pub fn metrics_registry(&self) -> &MetricsRegistry {
        &self.metrics
    }
}

fn to_snapshot(metric: Metric) -> MetricSnapshot {
    MetricSnapshot {
        id: metric.id.to_string(),
        unit: metric.unit,
        value: match metric.value {
            MetricValue::Counter(v) => v as f64,
            MetricValue::Gauge(v) => v,
        },
    }
}

impl Default for TelemetryService {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::telemetry::{ids, MetricId};

    #[test]
    fn test_snapshot_reports_counters() {
        let service = TelemetryService::default();
        let counter = service
            .metrics_registry()
            .register_counter(ids::mouse_events(), "Pointer polling ticks")
            .unwrap();
        counter.increment_by(3).unwrap();

        let snapshot = service.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, "input:mouse_events");
        assert_eq!(snapshot[0].value, 3.0);

        let json = service.snapshot_json().unwrap();
        assert!(json.contains("input:mouse_events"));
    }

    #[test]
    fn test_namespace_snapshot_filters_and_reads_gauges() {
        let service = TelemetryService::default();
        let registry = service.metrics_registry();
        let pending = registry
            .register_gauge(ids::pending_states(), "Queued input states", "states")
            .unwrap();
        registry
            .register_gauge(MetricId::new("window", "width"), "Client width", "px")
            .unwrap();
        pending.set(4.0).unwrap();

        let input = service.namespace_snapshot("input");
        assert_eq!(input.len(), 1);
        assert_eq!(input[0].id, "input:pending_states");
        assert_eq!(input[0].unit, "states");
        assert_eq!(input[0].value, 4.0);
        assert!(service.namespace_snapshot("audio").is_empty());
    }

    #[test]
    fn test_tick_respects_interval() {
        let mut service = TelemetryService::new(Duration::from_secs(3600));
        assert!(!service.tick());

        let mut service = TelemetryService::new(Duration::ZERO);
        assert!(service.tick());
    }
}
