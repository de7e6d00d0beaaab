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

//! The cancellable close protocol of a window.

use std::fmt;

/// The result of a close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// A subscriber intercepted the request; the window stays open.
    Cancelled,
    /// Nobody intercepted the request; the window closed and `exited` fired.
    Closed,
    /// The window had already closed; nothing happened.
    AlreadyClosed,
}

type ExitRequestedFn = Box<dyn FnMut() -> bool + Send>;
type ExitedFn = Box<dyn FnMut() + Send>;

/// Subscribers to the "exit requested" and "exited" notifications.
///
/// Every "exit requested" subscriber runs on each request; the request is cancelled
/// if any of them returns `true`. "exited" fires at most once.
#[derive(Default)]
pub struct ExitHandshake {
    exit_requested: Vec<ExitRequestedFn>,
    exited: Vec<ExitedFn>,
    has_exited: bool,
}

impl fmt::Debug for ExitHandshake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExitHandshake")
            .field("exit_requested", &self.exit_requested.len())
            .field("exited", &self.exited.len())
            .field("has_exited", &self.has_exited)
            .finish()
    }
}

impl ExitHandshake {
    /// Creates a handshake with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to close requests. Returning `true` cancels the request.
    pub fn on_exit_requested<F>(&mut self, callback: F)
    where
        F: FnMut() -> bool + Send + 'static,
    {
        self.exit_requested.push(Box::new(callback));
    }

    /// Subscribes to the terminal "exited" notification.
    pub fn on_exited<F>(&mut self, callback: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.exited.push(Box::new(callback));
    }

    /// Asks every subscriber whether the exit should be cancelled.
    ///
    /// All subscribers are consulted, even after one has cancelled.
    pub fn should_cancel(&mut self) -> bool {
        self.exit_requested
            .iter_mut()
            .fold(false, |cancel, callback| callback() || cancel)
    }

    /// Fires "exited" if it has not fired yet. Returns `true` if it fired now.
    pub fn notify_exited(&mut self) -> bool {
        if self.has_exited {
            return false;
        }
        self.has_exited = true;
        for callback in &mut self.exited {
            callback();
        }
        true
    }

    /// Returns `true` once "exited" has fired.
    pub fn has_exited(&self) -> bool {
        self.has_exited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn no_subscribers_means_no_cancel() {
        let mut handshake = ExitHandshake::new();
        assert!(!handshake.should_cancel());
    }

    #[test]
    fn every_subscriber_is_consulted() {
        let mut handshake = ExitHandshake::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let c = calls.clone();
        handshake.on_exit_requested(move || {
            c.fetch_add(1, Ordering::SeqCst);
            true
        });
        let c = calls.clone();
        handshake.on_exit_requested(move || {
            c.fetch_add(1, Ordering::SeqCst);
            false
        });

        assert!(handshake.should_cancel());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn exited_fires_once() {
        let mut handshake = ExitHandshake::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let f = fired.clone();
        handshake.on_exited(move || {
            f.fetch_add(1, Ordering::SeqCst);
        });

        assert!(handshake.notify_exited());
        assert!(!handshake.notify_exited());
        assert!(handshake.has_exited());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
