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

use lumen_core::input::{
    InputContext, InputHandler, InputHost, InputState, KeyboardState, PollRegistration,
};
use lumen_core::telemetry::CounterSink;
use std::sync::Arc;

/// Priority of the keyboard handler, above the cursor fallback.
pub const KEYBOARD_POLLING_PRIORITY: i32 = 1;

/// Polls the held keys on every tick of the input scheduler.
#[derive(Debug)]
pub struct KeyboardPollingHandler {
    events: Arc<dyn CounterSink>,
    registration: Option<PollRegistration>,
}

impl KeyboardPollingHandler {
    /// Creates a handler that counts its ticks in `events`.
    pub fn new(events: Arc<dyn CounterSink>) -> Self {
        Self {
            events,
            registration: None,
        }
    }
}

impl InputHandler for KeyboardPollingHandler {
    fn name(&self) -> &str {
        "keyboard"
    }

    fn initialize(&mut self, context: &InputContext) -> bool {
        if self.registration.is_some() {
            log::warn!("Keyboard polling handler is already initialized.");
            return false;
        }

        let host = context.host.clone();
        let pending = context.pending.clone();
        let events = self.events.clone();
        self.registration = Some(PollRegistration::register(&context.scheduler, move || {
            pending.enqueue(InputState::from_keyboard(poll_keyboard(host.as_ref())));
            events.increment();
        }));
        true
    }

    fn is_active(&self) -> bool {
        true
    }

    fn priority(&self) -> i32 {
        KEYBOARD_POLLING_PRIORITY
    }

    fn dispose(&mut self) {
        if let Some(registration) = self.registration.take() {
            registration.dispose();
        }
    }
}

impl Drop for KeyboardPollingHandler {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Builds one keyboard snapshot; empty while the window is inactive.
pub fn poll_keyboard(host: &dyn InputHost) -> KeyboardState {
    if host.is_window_active() {
        KeyboardState::new(host.pressed_keys())
    } else {
        KeyboardState::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::input::RawPointerState;
    use lumen_core::math::Vec2;

    struct KeysHost(bool);

    impl InputHost for KeysHost {
        fn raw_pointer(&self) -> RawPointerState {
            RawPointerState::default()
        }

        fn point_to_client(&self, screen: Vec2) -> Vec2 {
            screen
        }

        fn is_window_active(&self) -> bool {
            self.0
        }

        fn pressed_keys(&self) -> Vec<String> {
            vec!["KeyW".into(), "ShiftLeft".into()]
        }
    }

    #[test]
    fn test_keys_only_reported_while_active() {
        let state = poll_keyboard(&KeysHost(true));
        assert!(state.is_pressed("KeyW"));
        assert!(state.is_pressed("ShiftLeft"));

        assert!(poll_keyboard(&KeysHost(false)).pressed_keys().is_empty());
    }
}
