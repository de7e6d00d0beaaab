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

//! A single-threaded cooperative task queue.
//!
//! Work can be submitted from any thread, but only the thread that owns the
//! scheduler (the first one to call [`Scheduler::update`]) executes it. Each
//! update runs every due task in `(due time, submission order)` order. Tasks
//! must be non-blocking: a tick that stalls stalls every other task.

mod clock;
mod task;

pub use self::clock::{Clock, ManualClock, SystemClock};
pub use self::task::{ScheduledTask, TaskId};

use self::task::{Entry, TaskState};
use std::collections::BinaryHeap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use std::thread::{self, ThreadId};
use std::time::Duration;

/// An error returned by [`Scheduler::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// The scheduler was updated from a thread other than the one that owns it.
    WrongThread {
        /// The thread the scheduler is bound to.
        owner: ThreadId,
        /// The thread that attempted the update.
        caller: ThreadId,
    },
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerError::WrongThread { owner, caller } => write!(
                f,
                "Scheduler is bound to thread {owner:?} but was updated from {caller:?}"
            ),
        }
    }
}

impl std::error::Error for SchedulerError {}

struct Inner {
    queue: Mutex<BinaryHeap<Entry>>,
    next_id: AtomicU64,
    owner: OnceLock<ThreadId>,
    clock: Arc<dyn Clock>,
}

/// A cooperative scheduler bound to one logical thread.
///
/// `Scheduler` is a cheap, cloneable handle: clones share the same queue, so a
/// clone can be handed to producers on other threads to submit work.
#[derive(Clone)]
pub struct Scheduler {
    inner: Arc<Inner>,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("pending", &self.pending_count())
            .field("owner", &self.inner.owner.get())
            .finish()
    }
}

impl Scheduler {
    /// Creates a scheduler driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock::new()))
    }

    /// Creates a scheduler driven by the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(Inner {
                queue: Mutex::new(BinaryHeap::new()),
                next_id: AtomicU64::new(0),
                owner: OnceLock::new(),
                clock,
            }),
        }
    }

    /// Returns the scheduler's current time.
    pub fn now(&self) -> Duration {
        self.inner.clock.now()
    }

    /// Queues `work` to run once, on the next update.
    pub fn add<F>(&self, work: F) -> ScheduledTask
    where
        F: FnMut() + Send + 'static,
    {
        self.enqueue(Box::new(work), Duration::ZERO, None)
    }

    /// Queues `work` to run once, no earlier than `delay` from now.
    pub fn add_delayed<F>(&self, work: F, delay: Duration) -> ScheduledTask
    where
        F: FnMut() + Send + 'static,
    {
        self.enqueue(Box::new(work), delay, None)
    }

    /// Queues `work` to run after `delay`, then every `interval`.
    ///
    /// An `interval` of zero runs the task on every update.
    pub fn add_repeating<F>(&self, work: F, delay: Duration, interval: Duration) -> ScheduledTask
    where
        F: FnMut() + Send + 'static,
    {
        self.enqueue(Box::new(work), delay, Some(interval))
    }

    fn enqueue(
        &self,
        work: Box<dyn FnMut() + Send>,
        delay: Duration,
        interval: Option<Duration>,
    ) -> ScheduledTask {
        let id = TaskId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let state = Arc::new(TaskState::default());
        let entry = Entry {
            id,
            due: self.now().saturating_add(delay),
            interval,
            work,
            state: state.clone(),
        };
        self.lock_queue().push(entry);
        log::trace!("Scheduled {id} (delay: {delay:?}, interval: {interval:?}).");
        ScheduledTask::new(id, state)
    }

    /// Runs every task that is due, returning how many ran.
    ///
    /// The calling thread becomes the owner on the first call; later calls from
    /// any other thread are refused. Tasks queued while this runs, including
    /// re-queued repeating tasks, wait for the next update.
    pub fn update(&self) -> Result<usize, SchedulerError> {
        self.check_owner()?;
        let now = self.now();

        let due = {
            let mut queue = self.lock_queue();
            let mut due = Vec::new();
            while queue.peek().is_some_and(|entry| entry.due <= now) {
                if let Some(entry) = queue.pop() {
                    due.push(entry);
                }
            }
            due
        };

        let mut ran = 0;
        let mut requeue = Vec::new();
        for mut entry in due {
            if entry.state.is_cancelled() {
                continue;
            }

            (entry.work)();
            entry.state.record_run();
            ran += 1;

            match entry.interval {
                Some(interval) if !entry.state.is_cancelled() => {
                    entry.due = entry.due.saturating_add(interval).max(now);
                    requeue.push(entry);
                }
                Some(_) => {}
                None => entry.state.mark_completed(),
            }
        }

        if !requeue.is_empty() {
            self.lock_queue().extend(requeue);
        }

        Ok(ran)
    }

    /// Returns the number of queued tasks that have not been cancelled.
    pub fn pending_count(&self) -> usize {
        self.lock_queue()
            .iter()
            .filter(|entry| !entry.state.is_cancelled())
            .count()
    }

    /// Cancels and removes every queued task.
    pub fn clear(&self) {
        let mut queue = self.lock_queue();
        for entry in queue.drain() {
            ScheduledTask::new(entry.id, entry.state).cancel();
        }
    }

    /// Returns `true` if the calling thread owns this scheduler.
    pub fn is_owner_thread(&self) -> bool {
        self.inner.owner.get() == Some(&thread::current().id())
    }

    fn check_owner(&self) -> Result<(), SchedulerError> {
        let caller = thread::current().id();
        let owner = *self.inner.owner.get_or_init(|| caller);
        if owner == caller {
            Ok(())
        } else {
            Err(SchedulerError::WrongThread { owner, caller })
        }
    }

    fn lock_queue(&self) -> MutexGuard<'_, BinaryHeap<Entry>> {
        // A panicking task never holds the lock, so a poisoned queue is still consistent.
        self.inner
            .queue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
