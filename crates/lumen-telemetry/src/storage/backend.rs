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

use lumen_core::telemetry::{Metric, MetricId, MetricType, MetricValue, MetricsError, MetricsResult};
use std::fmt::Debug;

/// Trait defining the interface for metrics storage backends.
///
/// Counter increments go through [`modify_metric`](Self::modify_metric), which
/// must apply the closure under a single write lock so that concurrent polling
/// ticks never lose an increment.
pub trait MetricsBackend: Send + Sync + Debug + 'static {
    /// Store or replace a metric.
    fn put_metric(&self, metric: Metric) -> MetricsResult<()>;

    /// Retrieve a copy of a metric by ID.
    fn get_metric(&self, id: &MetricId) -> MetricsResult<Metric>;

    /// Apply `f` to the stored metric atomically and return what it produced.
    fn modify_metric(
        &self,
        id: &MetricId,
        f: &mut dyn FnMut(&mut Metric) -> MetricsResult<MetricValue>,
    ) -> MetricsResult<MetricValue>;

    /// Check if a metric exists.
    fn contains_metric(&self, id: &MetricId) -> bool;

    /// Remove a metric.
    fn remove_metric(&self, id: &MetricId) -> MetricsResult<()>;

    /// Get every stored metric.
    fn list_all_metrics(&self) -> Vec<Metric>;

    /// Remove every metric.
    fn clear_all(&self) -> MetricsResult<()>;

    /// Get the number of metrics stored.
    fn metric_count(&self) -> usize;

    /// Increment a counter by the given amount, returning the new value.
    fn increment_counter(&self, id: &MetricId, delta: u64) -> MetricsResult<u64> {
        let value = self.modify_metric(id, &mut |metric| match metric.value {
            MetricValue::Counter(ref mut value) => {
                *value = value.saturating_add(delta);
                Ok(MetricValue::Counter(*value))
            }
            other => Err(MetricsError::TypeMismatch {
                expected: MetricType::Counter,
                found: other.metric_type(),
            }),
        })?;
        Ok(value.as_counter().unwrap_or_default())
    }

    /// Set a gauge value.
    fn set_gauge(&self, id: &MetricId, value: f64) -> MetricsResult<()> {
        self.modify_metric(id, &mut |metric| match metric.value {
            MetricValue::Gauge(ref mut gauge) => {
                *gauge = value;
                Ok(MetricValue::Gauge(value))
            }
            other => Err(MetricsError::TypeMismatch {
                expected: MetricType::Gauge,
                found: other.metric_type(),
            }),
        })
        .map(|_| ())
    }
}
