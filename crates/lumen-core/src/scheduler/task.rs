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

use std::cmp::Ordering as CmpOrdering;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// A unique identifier for a task submitted to a [`Scheduler`](super::Scheduler).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

/// Shared between the queue entry and every handle to it.
#[derive(Debug, Default)]
pub(crate) struct TaskState {
    cancelled: AtomicBool,
    completed: AtomicBool,
    runs: AtomicU64,
}

impl TaskState {
    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    pub(crate) fn record_run(&self) {
        self.runs.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn mark_completed(&self) {
        self.completed.store(true, Ordering::Release);
    }
}

/// A handle to work submitted to a [`Scheduler`](super::Scheduler).
///
/// Cloning the handle is cheap; every clone controls the same task.
#[derive(Debug, Clone)]
pub struct ScheduledTask {
    id: TaskId,
    state: Arc<TaskState>,
}

impl ScheduledTask {
    pub(crate) fn new(id: TaskId, state: Arc<TaskState>) -> Self {
        Self { id, state }
    }

    /// Returns the task's identifier.
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Cancels the task.
    ///
    /// A pending or repeating task never runs again once this returns. A run that
    /// is already in progress finishes, but a repeating task is not re-queued.
    pub fn cancel(&self) {
        if !self.state.cancelled.swap(true, Ordering::AcqRel) {
            log::trace!("Cancelled {}.", self.id);
        }
    }

    /// Returns `true` if [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.state.is_cancelled()
    }

    /// Returns `true` once a run-once task has executed.
    pub fn is_completed(&self) -> bool {
        self.state.completed.load(Ordering::Acquire)
    }

    /// Returns how many times the task has run.
    pub fn run_count(&self) -> u64 {
        self.state.runs.load(Ordering::Relaxed)
    }
}

/// A queued unit of work, ordered by due time then submission order.
pub(crate) struct Entry {
    pub(crate) id: TaskId,
    pub(crate) due: Duration,
    pub(crate) interval: Option<Duration>,
    pub(crate) work: Box<dyn FnMut() + Send>,
    pub(crate) state: Arc<TaskState>,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.id == other.id
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Reversed so that `BinaryHeap` pops the earliest (due, id) first.
    fn cmp(&self, other: &Self) -> CmpOrdering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.id.cmp(&self.id))
    }
}
