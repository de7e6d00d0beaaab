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

//! The fallback pointer handler: polls the cursor once per input-thread tick.

use lumen_core::input::{
    InputContext, InputHandler, InputHost, InputState, MouseButton, MouseState, PollRegistration,
};
use lumen_core::telemetry::CounterSink;
use std::sync::Arc;

/// Priority of the fallback pointer handler. Every other handler ranks above it.
pub const CURSOR_POLLING_PRIORITY: i32 = 0;

/// Polls the OS cursor on every tick of the input scheduler.
///
/// Always active and lowest in priority: it reports the cursor position when no
/// more specific pointer handler does.
#[derive(Debug)]
pub struct CursorPollingHandler {
    events: Arc<dyn CounterSink>,
    registration: Option<PollRegistration>,
}

impl CursorPollingHandler {
    /// Creates a handler that counts its ticks in `events`.
    pub fn new(events: Arc<dyn CounterSink>) -> Self {
        Self {
            events,
            registration: None,
        }
    }
}

impl InputHandler for CursorPollingHandler {
    fn name(&self) -> &str {
        "cursor"
    }

    fn initialize(&mut self, context: &InputContext) -> bool {
        if self.registration.is_some() {
            log::warn!("Cursor polling handler is already initialized.");
            return false;
        }

        let host = context.host.clone();
        let pending = context.pending.clone();
        let events = self.events.clone();
        self.registration = Some(PollRegistration::register(&context.scheduler, move || {
            let state = poll_cursor(host.as_ref());
            pending.enqueue(InputState::from_mouse(state));
            events.increment();
        }));

        log::debug!("Cursor polling handler registered on the input scheduler.");
        true
    }

    fn is_active(&self) -> bool {
        true
    }

    fn priority(&self) -> i32 {
        CURSOR_POLLING_PRIORITY
    }

    fn dispose(&mut self) {
        if let Some(registration) = self.registration.take() {
            registration.dispose();
            log::debug!("Cursor polling handler disposed.");
        }
    }
}

impl Drop for CursorPollingHandler {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Builds one pointer snapshot from the host.
///
/// While the window is inactive the wheel reads as zero and no button is reported.
/// Buttons are only collected when the window is active and at least one is down.
pub fn poll_cursor(host: &dyn InputHost) -> MouseState {
    let raw = host.raw_pointer();
    let active = host.is_window_active();
    let position = host.point_to_client(raw.screen_position);

    let mut state = MouseState::new(position);
    if !active {
        return state;
    }

    state = state.with_wheel_delta(raw.wheel);
    if raw.is_any_button_down() {
        for button in MouseButton::ALL {
            if raw.button(button).is_pressed() {
                state = state.with_pressed(button);
            }
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::input::{ButtonState, RawPointerState};
    use lumen_core::math::Vec2;

    struct FixedHost {
        raw: RawPointerState,
        active: bool,
    }

    impl InputHost for FixedHost {
        fn raw_pointer(&self) -> RawPointerState {
            self.raw
        }

        fn point_to_client(&self, screen: Vec2) -> Vec2 {
            screen - Vec2::new(100.0, 100.0)
        }

        fn is_window_active(&self) -> bool {
            self.active
        }
    }

    fn raw_with(buttons: &[MouseButton], wheel: i32) -> RawPointerState {
        let mut raw = RawPointerState {
            screen_position: Vec2::new(150.0, 120.0),
            wheel,
            ..Default::default()
        };
        for &button in buttons {
            raw.set_button(button, ButtonState::Pressed);
        }
        raw
    }

    #[test]
    fn test_inactive_window_suppresses_wheel_and_buttons() {
        let host = FixedHost {
            raw: raw_with(&[MouseButton::Left, MouseButton::Right], 3),
            active: false,
        };
        let state = poll_cursor(&host);

        assert_eq!(state.position(), Vec2::new(50.0, 20.0));
        assert_eq!(state.wheel_delta(), 0);
        assert!(!state.has_any_button_pressed());
    }

    #[test]
    fn test_active_window_reports_left_only() {
        let host = FixedHost {
            raw: raw_with(&[MouseButton::Left], 0),
            active: true,
        };
        let state = poll_cursor(&host);

        assert_eq!(state.pressed_buttons().len(), 1);
        assert!(state.is_pressed(MouseButton::Left));
    }

    #[test]
    fn test_active_window_reports_every_button_and_wheel() {
        let host = FixedHost {
            raw: raw_with(&MouseButton::ALL, -2),
            active: true,
        };
        let state = poll_cursor(&host);

        assert_eq!(state.wheel_delta(), -2);
        assert_eq!(state.pressed_buttons().len(), MouseButton::ALL.len());
    }

    #[test]
    fn test_priority_and_activity() {
        let handler = CursorPollingHandler::new(Arc::new(lumen_core::telemetry::NullCounter));
        assert!(handler.is_active());
        assert_eq!(handler.priority(), 0);
    }
}
