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

//! The contract every input source implements.

use super::host::InputHost;
use super::state::InputState;
use crate::scheduler::{ScheduledTask, Scheduler};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// The producing end of the pending-states queue.
///
/// Cheap to clone; each handler keeps its own copy.
#[derive(Debug, Clone)]
pub struct PendingStates {
    sender: flume::Sender<InputState>,
}

impl PendingStates {
    pub(crate) fn new(sender: flume::Sender<InputState>) -> Self {
        Self { sender }
    }

    /// Queues one snapshot. Returns `false` if the aggregator is gone.
    pub fn enqueue(&self, state: InputState) -> bool {
        match self.sender.send(state) {
            Ok(()) => true,
            Err(_) => {
                log::trace!("Pending input state dropped: aggregator disconnected.");
                false
            }
        }
    }
}

/// Everything a handler is bound to when it is initialized.
#[derive(Clone)]
pub struct InputContext {
    /// Raw device state and window queries.
    pub host: Arc<dyn InputHost>,
    /// The input thread's scheduler.
    pub scheduler: Scheduler,
    /// Where snapshots are queued for the frame thread.
    pub pending: PendingStates,
}

impl fmt::Debug for InputContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputContext")
            .field("scheduler", &self.scheduler)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

/// A source of input snapshots.
///
/// Handlers are constructed once, initialized against an [`InputContext`], run for
/// the lifetime of the process and disposed on shutdown. `priority` is ordering
/// metadata: more specific handlers report higher values and are initialized first,
/// but every active handler's snapshots reach the aggregator.
pub trait InputHandler: Send {
    /// A short, human-readable name used in logs.
    fn name(&self) -> &str;

    /// Binds the handler to the host and schedules its work.
    ///
    /// Returns `false` if registration failed; the caller decides whether that is fatal.
    fn initialize(&mut self, context: &InputContext) -> bool;

    /// Returns `true` while this handler contributes snapshots.
    fn is_active(&self) -> bool;

    /// Tie-break rank; higher values are consulted first.
    fn priority(&self) -> i32;

    /// Cancels the handler's scheduled work. No snapshot is queued once this returns,
    /// except by a tick that had already started.
    fn dispose(&mut self);
}

/// A zero-delay repeating task gated by a dispose flag.
///
/// Shared by the polling handlers: the scheduler runs `tick` once per update until
/// [`dispose`](Self::dispose) is called.
#[derive(Debug)]
pub struct PollRegistration {
    task: ScheduledTask,
    disposed: Arc<AtomicBool>,
}

impl PollRegistration {
    /// Schedules `tick` on every update of `scheduler`.
    pub fn register<F>(scheduler: &Scheduler, mut tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let disposed = Arc::new(AtomicBool::new(false));
        let gate = disposed.clone();
        let task = scheduler.add_repeating(
            move || {
                if !gate.load(Ordering::Acquire) {
                    tick();
                }
            },
            Duration::ZERO,
            Duration::ZERO,
        );
        Self { task, disposed }
    }

    /// Stops the task. Idempotent.
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
        self.task.cancel();
    }

    /// Returns `true` once [`dispose`](Self::dispose) has been called.
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// Returns the underlying scheduled task.
    pub fn task(&self) -> &ScheduledTask {
        &self.task
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualClock;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn poll_registration_stops_after_dispose() {
        let scheduler = Scheduler::with_clock(Arc::new(ManualClock::new()));
        let ticks = Arc::new(AtomicUsize::new(0));
        let t = ticks.clone();

        let registration = PollRegistration::register(&scheduler, move || {
            t.fetch_add(1, Ordering::SeqCst);
        });

        scheduler.update().unwrap();
        scheduler.update().unwrap();
        registration.dispose();
        registration.dispose();
        scheduler.update().unwrap();

        assert_eq!(ticks.load(Ordering::SeqCst), 2);
        assert!(registration.is_disposed());
        assert!(registration.task().is_cancelled());
        assert_eq!(scheduler.pending_count(), 0);
    }
}
