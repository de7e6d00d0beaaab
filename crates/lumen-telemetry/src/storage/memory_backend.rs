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

use crate::storage::backend::MetricsBackend;
use lumen_core::telemetry::{Metric, MetricId, MetricValue, MetricsError, MetricsResult};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory metrics backend over an `RwLock<HashMap>`.
///
/// Reads from the frame thread run concurrently; increments from the input
/// thread take the write lock once per call.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    storage: RwLock<HashMap<MetricId, Metric>>,
}

impl InMemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> MetricsResult<RwLockReadGuard<'_, HashMap<MetricId, Metric>>> {
        self.storage
            .read()
            .map_err(|_| MetricsError::StorageError("Failed to acquire read lock".to_string()))
    }

    fn write(&self) -> MetricsResult<RwLockWriteGuard<'_, HashMap<MetricId, Metric>>> {
        self.storage
            .write()
            .map_err(|_| MetricsError::StorageError("Failed to acquire write lock".to_string()))
    }
}

impl MetricsBackend for InMemoryBackend {
    fn put_metric(&self, metric: Metric) -> MetricsResult<()> {
        self.write()?.insert(metric.id.clone(), metric);
        Ok(())
    }

    fn get_metric(&self, id: &MetricId) -> MetricsResult<Metric> {
        self.read()?
            .get(id)
            .cloned()
            .ok_or_else(|| MetricsError::MetricNotFound(id.clone()))
    }

    fn modify_metric(
        &self,
        id: &MetricId,
        f: &mut dyn FnMut(&mut Metric) -> MetricsResult<MetricValue>,
    ) -> MetricsResult<MetricValue> {
        let mut storage = self.write()?;
        let metric = storage
            .get_mut(id)
            .ok_or_else(|| MetricsError::MetricNotFound(id.clone()))?;
        let value = f(metric)?;
        metric.touch();
        Ok(value)
    }

    fn contains_metric(&self, id: &MetricId) -> bool {
        self.read().is_ok_and(|storage| storage.contains_key(id))
    }

    fn remove_metric(&self, id: &MetricId) -> MetricsResult<()> {
        self.write()?
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| MetricsError::MetricNotFound(id.clone()))
    }

    fn list_all_metrics(&self) -> Vec<Metric> {
        self.read()
            .map(|storage| storage.values().cloned().collect())
            .unwrap_or_default()
    }

    fn clear_all(&self) -> MetricsResult<()> {
        self.write()?.clear();
        Ok(())
    }

    fn metric_count(&self) -> usize {
        self.read().map(|storage| storage.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::telemetry::MetricType;
    use std::sync::Arc;

    #[test]
    fn test_put_get_remove() {
        let backend = InMemoryBackend::new();
        let id = MetricId::new("input", "mouse_events");
        backend
            .put_metric(Metric::counter(id.clone(), "Pointer polls"))
            .unwrap();

        assert!(backend.contains_metric(&id));
        assert_eq!(backend.get_metric(&id).unwrap().value, MetricValue::Counter(0));

        backend.remove_metric(&id).unwrap();
        assert!(!backend.contains_metric(&id));
        assert_eq!(backend.remove_metric(&id), Err(MetricsError::MetricNotFound(id)));
    }

    #[test]
    fn test_increment_wrong_type_is_rejected() {
        let backend = InMemoryBackend::new();
        let id = MetricId::new("input", "pending");
        backend
            .put_metric(Metric::gauge(id.clone(), "Queued states", "states"))
            .unwrap();

        assert_eq!(
            backend.increment_counter(&id, 1),
            Err(MetricsError::TypeMismatch {
                expected: MetricType::Counter,
                found: MetricType::Gauge,
            })
        );
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let backend = Arc::new(InMemoryBackend::new());
        let id = MetricId::new("input", "mouse_events");
        backend
            .put_metric(Metric::counter(id.clone(), "Pointer polls"))
            .unwrap();

        let threads: Vec<_> = (0..8)
            .map(|_| {
                let backend = backend.clone();
                let id = id.clone();
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        backend.increment_counter(&id, 1).unwrap();
                    }
                })
            })
            .collect();
        for thread in threads {
            thread.join().unwrap();
        }

        assert_eq!(backend.get_metric(&id).unwrap().value.as_counter(), Some(2000));
    }

    #[test]
    fn test_clear_all() {
        let backend = InMemoryBackend::new();
        backend
            .put_metric(Metric::counter(MetricId::new("input", "a"), ""))
            .unwrap();
        backend
            .put_metric(Metric::gauge(MetricId::new("input", "b"), "", "states"))
            .unwrap();

        assert_eq!(backend.metric_count(), 2);
        backend.clear_all().unwrap();
        assert_eq!(backend.metric_count(), 0);
        assert!(backend.list_all_metrics().is_empty());
    }
}
