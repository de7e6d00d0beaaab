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

//! The ordered set of input handlers.

use super::handler::{InputContext, InputHandler};
use std::cmp::Reverse;

/// The outcome of [`HandlerRegistry::initialize_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationReport {
    /// Names of handlers that registered successfully, in initialization order.
    pub initialized: Vec<String>,
    /// Names of handlers whose `initialize` returned `false`.
    pub failed: Vec<String>,
}

impl RegistrationReport {
    /// Returns `true` if no handler failed.
    pub fn all_initialized(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Holds every input handler, sorted by descending priority.
///
/// The sort is stable, so handlers with equal priority keep their registration
/// order. Handlers are disposed when the registry is dropped.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: Vec<Box<dyn InputHandler>>,
    disposed: bool,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a handler, keeping the list ordered by descending priority.
    pub fn register(&mut self, handler: Box<dyn InputHandler>) {
        log::debug!(
            "Registering input handler '{}' (priority {}).",
            handler.name(),
            handler.priority()
        );
        self.handlers.push(handler);
        self.handlers.sort_by_key(|h| Reverse(h.priority()));
    }

    /// Initializes every handler in priority order.
    ///
    /// Failures are reported, not retried.
    pub fn initialize_all(&mut self, context: &InputContext) -> RegistrationReport {
        let mut report = RegistrationReport::default();
        for handler in &mut self.handlers {
            let name = handler.name().to_string();
            if handler.initialize(context) {
                log::info!("Input handler '{name}' initialized.");
                report.initialized.push(name);
            } else {
                log::warn!("Input handler '{name}' failed to initialize.");
                report.failed.push(name);
            }
        }
        self.disposed = false;
        report
    }

    /// Iterates over every handler in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn InputHandler> {
        self.handlers.iter().map(|h| h.as_ref())
    }

    /// Iterates over the handlers that currently contribute, in priority order.
    pub fn active(&self) -> impl Iterator<Item = &dyn InputHandler> {
        self.iter().filter(|h| h.is_active())
    }

    /// Returns the number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Disposes every handler. Idempotent.
    pub fn dispose_all(&mut self) {
        if self.disposed {
            return;
        }
        for handler in &mut self.handlers {
            log::debug!("Disposing input handler '{}'.", handler.name());
            handler.dispose();
        }
        self.disposed = true;
    }
}

impl Drop for HandlerRegistry {
    fn drop(&mut self) {
        self.dispose_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::aggregator::InputStateAggregator;
    use crate::input::host::{InputHost, RawPointerState};
    use crate::math::Vec2;
    use crate::scheduler::Scheduler;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct NullHost;

    impl InputHost for NullHost {
        fn raw_pointer(&self) -> RawPointerState {
            RawPointerState::default()
        }
        fn point_to_client(&self, screen: Vec2) -> Vec2 {
            screen
        }
        fn is_window_active(&self) -> bool {
            true
        }
    }

    struct StubHandler {
        name: &'static str,
        priority: i32,
        accept: bool,
        disposals: Arc<AtomicUsize>,
    }

    impl InputHandler for StubHandler {
        fn name(&self) -> &str {
            self.name
        }
        fn initialize(&mut self, _context: &InputContext) -> bool {
            self.accept
        }
        fn is_active(&self) -> bool {
            self.accept
        }
        fn priority(&self) -> i32 {
            self.priority
        }
        fn dispose(&mut self) {
            self.disposals.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn stub(name: &'static str, priority: i32, accept: bool, disposals: &Arc<AtomicUsize>) -> Box<dyn InputHandler> {
        Box::new(StubHandler {
            name,
            priority,
            accept,
            disposals: disposals.clone(),
        })
    }

    fn context(aggregator: &InputStateAggregator) -> InputContext {
        InputContext {
            host: Arc::new(NullHost),
            scheduler: Scheduler::new(),
            pending: aggregator.pending_states(),
        }
    }

    #[test]
    fn handlers_are_ordered_by_descending_priority_stably() {
        let disposals = Arc::new(AtomicUsize::new(0));
        let mut registry = HandlerRegistry::new();
        registry.register(stub("fallback", 0, true, &disposals));
        registry.register(stub("raw-a", 10, true, &disposals));
        registry.register(stub("raw-b", 10, true, &disposals));
        registry.register(stub("keyboard", 5, true, &disposals));

        let names: Vec<_> = registry.iter().map(|h| h.name().to_string()).collect();
        assert_eq!(names, vec!["raw-a", "raw-b", "keyboard", "fallback"]);
    }

    #[test]
    fn failed_registration_is_reported() {
        let disposals = Arc::new(AtomicUsize::new(0));
        let aggregator = InputStateAggregator::new();
        let mut registry = HandlerRegistry::new();
        registry.register(stub("ok", 1, true, &disposals));
        registry.register(stub("broken", 2, false, &disposals));

        let report = registry.initialize_all(&context(&aggregator));

        assert!(!report.all_initialized());
        assert_eq!(report.initialized, vec!["ok".to_string()]);
        assert_eq!(report.failed, vec!["broken".to_string()]);
        assert_eq!(registry.active().count(), 1);
    }

    #[test]
    fn handlers_are_disposed_once_on_drop() {
        let disposals = Arc::new(AtomicUsize::new(0));
        {
            let mut registry = HandlerRegistry::new();
            registry.register(stub("a", 0, true, &disposals));
            registry.register(stub("b", 1, true, &disposals));
            registry.dispose_all();
        }
        assert_eq!(disposals.load(Ordering::SeqCst), 2);
    }
}
