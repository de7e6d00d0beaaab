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

//! The background thread that drives the input scheduler.

use anyhow::{Context, Result};
use lumen_core::scheduler::Scheduler;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Runs [`Scheduler::update`] at a fixed rate on a dedicated thread.
///
/// The thread becomes the scheduler's owner on its first update.
#[derive(Debug)]
pub struct InputThread {
    running: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl InputThread {
    /// Spawns the thread. It updates `scheduler` every `interval` until stopped.
    pub fn start(scheduler: Scheduler, interval: Duration) -> Result<Self> {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let handle = thread::Builder::new()
            .name("input".to_string())
            .spawn(move || {
                log::info!("Input thread started ({interval:?} per tick).");

                while flag.load(Ordering::Relaxed) {
                    let start_time = Instant::now();

                    if let Err(e) = scheduler.update() {
                        log::error!("Input scheduler refused the update: {e}");
                        break;
                    }

                    let elapsed = start_time.elapsed();
                    if elapsed < interval {
                        thread::sleep(interval - elapsed);
                    }
                }

                log::info!("Input thread stopped.");
            })
            .context("Failed to spawn the input thread")?;

        Ok(Self {
            running,
            handle: Some(handle),
        })
    }

    /// Returns `true` until [`stop`](Self::stop) is called or the loop ends.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
            && self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stops the thread and waits for its current tick to finish.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("The input thread panicked.");
            }
        }
    }
}

impl Drop for InputThread {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_thread_drives_repeating_tasks_until_stopped() {
        let scheduler = Scheduler::new();
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();
        scheduler.add_repeating(
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
            },
            Duration::ZERO,
            Duration::ZERO,
        );

        let mut input = InputThread::start(scheduler.clone(), Duration::from_millis(1)).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while ticks.load(Ordering::SeqCst) < 3 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        input.stop();

        let after_stop = ticks.load(Ordering::SeqCst);
        assert!(after_stop >= 3);
        assert!(!input.is_running());

        thread::sleep(Duration::from_millis(10));
        assert_eq!(ticks.load(Ordering::SeqCst), after_stop);
    }

    #[test]
    fn test_thread_exits_when_scheduler_is_owned_elsewhere() {
        let scheduler = Scheduler::new();
        scheduler.update().unwrap();

        let mut input = InputThread::start(scheduler, Duration::from_millis(1)).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while input.is_running() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert!(!input.is_running());
        input.stop();
    }
}
