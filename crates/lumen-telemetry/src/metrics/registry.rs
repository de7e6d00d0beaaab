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

//! Registry for managing metrics.

use crate::storage::{backend::MetricsBackend, memory_backend::InMemoryBackend};
use lumen_core::telemetry::{
    CounterSink, Metric, MetricId, MetricType, MetricsError, MetricsResult,
};
use std::sync::Arc;

/// Central registry for platform metrics.
///
/// Registration returns typed handles that can be cloned into other threads;
/// a [`CounterHandle`] is what the input handlers receive as their
/// [`CounterSink`].
#[derive(Debug, Clone)]
pub struct MetricsRegistry {
    backend: Arc<dyn MetricsBackend>,
}

impl MetricsRegistry {
    /// Create a registry over the in-memory backend.
    pub fn new() -> Self {
        Self::with_backend(Arc::new(InMemoryBackend::new()))
    }

    /// Create a registry over a custom backend.
    pub fn with_backend(backend: Arc<dyn MetricsBackend>) -> Self {
        Self { backend }
    }

    /// Register a counter. Registering an existing counter returns a handle to it
    /// without resetting its value.
    pub fn register_counter(
        &self,
        id: MetricId,
        description: impl Into<String>,
    ) -> MetricsResult<CounterHandle> {
        match self.backend.get_metric(&id) {
            Ok(existing) if existing.metric_type() != MetricType::Counter => {
                return Err(MetricsError::TypeMismatch {
                    expected: MetricType::Counter,
                    found: existing.metric_type(),
                })
            }
            Ok(_) => {}
            Err(_) => {
                log::debug!("Registered counter '{id}'.");
                self.backend.put_metric(Metric::counter(id.clone(), description))?;
            }
        }
        Ok(CounterHandle {
            id,
            backend: self.backend.clone(),
        })
    }

    /// Register a gauge. Registering an existing gauge returns a handle to it.
    pub fn register_gauge(
        &self,
        id: MetricId,
        description: impl Into<String>,
        unit: impl Into<String>,
    ) -> MetricsResult<GaugeHandle> {
        match self.backend.get_metric(&id) {
            Ok(existing) if existing.metric_type() != MetricType::Gauge => {
                return Err(MetricsError::TypeMismatch {
                    expected: MetricType::Gauge,
                    found: existing.metric_type(),
                })
            }
            Ok(_) => {}
            Err(_) => {
                log::debug!("Registered gauge '{id}'.");
                self.backend
                    .put_metric(Metric::gauge(id.clone(), description, unit))?;
            }
        }
        Ok(GaugeHandle {
            id,
            backend: self.backend.clone(),
        })
    }

    /// Get a metric by ID.
    pub fn get_metric(&self, id: &MetricId) -> MetricsResult<Metric> {
        self.backend.get_metric(id)
    }

    /// Check if a metric exists.
    pub fn contains_metric(&self, id: &MetricId) -> bool {
        self.backend.contains_metric(id)
    }

    /// Get every metric, sorted by identifier.
    pub fn all_metrics(&self) -> Vec<Metric> {
        let mut metrics = self.backend.list_all_metrics();
        metrics.sort_by_key(|metric| metric.id.to_string());
        metrics
    }

    /// Get every metric in `namespace`.
    pub fn namespace_metrics(&self, namespace: &str) -> Vec<Metric> {
        self.all_metrics()
            .into_iter()
            .filter(|metric| metric.id.namespace == namespace)
            .collect()
    }

    /// Get the total number of metrics.
    pub fn metric_count(&self) -> usize {
        self.backend.metric_count()
    }

    /// Remove every metric.
    pub fn clear_all(&self) -> MetricsResult<()> {
        self.backend.clear_all()
    }
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a registered counter.
#[derive(Debug, Clone)]
pub struct CounterHandle {
    id: MetricId,
    backend: Arc<dyn MetricsBackend>,
}

impl CounterHandle {
    /// Increment the counter by 1, returning the new value.
    pub fn increment(&self) -> MetricsResult<u64> {
        self.backend.increment_counter(&self.id, 1)
    }

    /// Increment the counter by `amount`, returning the new value.
    pub fn increment_by(&self, amount: u64) -> MetricsResult<u64> {
        self.backend.increment_counter(&self.id, amount)
    }

    /// Get the current value.
    pub fn get(&self) -> MetricsResult<u64> {
        let metric = self.backend.get_metric(&self.id)?;
        metric
            .value
            .as_counter()
            .ok_or_else(|| MetricsError::TypeMismatch {
                expected: MetricType::Counter,
                found: metric.value.metric_type(),
            })
    }

    /// Get the metric ID.
    pub fn id(&self) -> &MetricId {
        &self.id
    }
}

impl CounterSink for CounterHandle {
    fn add(&self, amount: u64) {
        if let Err(e) = self.increment_by(amount) {
            log::warn!("Failed to increment counter '{}': {e}", self.id);
        }
    }
}

/// Handle to a registered gauge.
#[derive(Debug, Clone)]
pub struct GaugeHandle {
    id: MetricId,
    backend: Arc<dyn MetricsBackend>,
}

impl GaugeHandle {
    /// Set the gauge to `value`.
    pub fn set(&self, value: f64) -> MetricsResult<()> {
        self.backend.set_gauge(&self.id, value)
    }

    /// Get the current value.
    pub fn get(&self) -> MetricsResult<f64> {
        let metric = self.backend.get_metric(&self.id)?;
        metric
            .value
            .as_gauge()
            .ok_or_else(|| MetricsError::TypeMismatch {
                expected: MetricType::Gauge,
                found: metric.value.metric_type(),
            })
    }

    /// Get the metric ID.
    pub fn id(&self) -> &MetricId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::telemetry::ids;

    #[test]
    fn test_counter_operations() {
        let registry = MetricsRegistry::new();
        let counter = registry
            .register_counter(ids::mouse_events(), "Pointer polling ticks")
            .unwrap();

        assert_eq!(counter.increment().unwrap(), 1);
        assert_eq!(counter.increment_by(5).unwrap(), 6);
        assert_eq!(counter.get().unwrap(), 6);
        assert!(registry.contains_metric(counter.id()));
        assert_eq!(registry.metric_count(), 1);
    }

    #[test]
    fn test_counter_as_sink() {
        let registry = MetricsRegistry::new();
        let counter = registry
            .register_counter(ids::keyboard_events(), "Keyboard polling ticks")
            .unwrap();
        let sink: Arc<dyn CounterSink> = Arc::new(counter.clone());

        sink.increment();
        sink.add(2);
        assert_eq!(counter.get().unwrap(), 3);
    }

    #[test]
    fn test_reregistration_keeps_value() {
        let registry = MetricsRegistry::new();
        let first = registry.register_counter(ids::mouse_events(), "").unwrap();
        first.increment_by(4).unwrap();

        let second = registry.register_counter(ids::mouse_events(), "").unwrap();
        assert_eq!(second.get().unwrap(), 4);

        assert!(matches!(
            registry.register_gauge(ids::mouse_events(), "", "count"),
            Err(MetricsError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_gauge_operations() {
        let registry = MetricsRegistry::new();
        let gauge = registry
            .register_gauge(MetricId::new("input", "pending_states"), "Queued states", "states")
            .unwrap();

        gauge.set(12.0).unwrap();
        assert_eq!(gauge.get().unwrap(), 12.0);
        assert_eq!(registry.namespace_metrics("input").len(), 1);
        assert!(registry.namespace_metrics("window").is_empty());
    }
}
