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

//! A `winit`-fed implementation of the [`InputHost`] contract.
//!
//! `winit` has no global device query: pointer and keyboard state only arrive as
//! window events on the event-loop thread. [`WinitInputHost`] records those events
//! into a shared snapshot that the polling handlers read from the input thread.

use lumen_core::input::{ButtonState, InputHost, MouseButton, RawPointerState};
use lumen_core::math::Vec2;
use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Pixel-precise scroll deltas are converted to wheel notches at this rate.
pub const PIXELS_PER_WHEEL_NOTCH: f64 = 120.0;

/// A backend-agnostic change to the host's device state.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// The cursor moved, in client coordinates.
    CursorMoved {
        /// The new client-space position.
        position: Vec2,
    },
    /// A pointer button changed state.
    Button {
        /// The button.
        button: MouseButton,
        /// The new state.
        state: ButtonState,
    },
    /// The wheel turned by a number of notches (fractional for touchpads).
    Wheel {
        /// Vertical notches, positive away from the user.
        notches: f32,
    },
    /// A physical key changed state.
    Key {
        /// The physical key-code name.
        key_code: String,
        /// Whether the key is now down.
        pressed: bool,
    },
    /// The window gained or lost focus.
    Focused(bool),
    /// The window's client area moved on the desktop.
    ClientOrigin(Vec2),
}

/// Translates a `winit::event::WindowEvent` into a [`HostEvent`].
///
/// Returns `None` for events the host does not track (redraws, resizes, ...)
/// and for pointer buttons outside the five the platform layer models.
pub fn translate_window_event(event: &WindowEvent) -> Option<HostEvent> {
    match event {
        WindowEvent::CursorMoved { position, .. } => Some(HostEvent::CursorMoved {
            position: Vec2::new(position.x as f32, position.y as f32),
        }),
        WindowEvent::MouseInput { state, button, .. } => {
            map_mouse_button(*button).map(|button| HostEvent::Button {
                button,
                state: (*state == ElementState::Pressed).into(),
            })
        }
        WindowEvent::MouseWheel { delta, .. } => {
            let notches = match delta {
                MouseScrollDelta::LineDelta(_, y) => *y,
                MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_WHEEL_NOTCH) as f32,
            };
            (notches != 0.0).then_some(HostEvent::Wheel { notches })
        }
        WindowEvent::KeyboardInput { event, .. } => match event.physical_key {
            PhysicalKey::Code(code) => Some(HostEvent::Key {
                key_code: map_keycode_to_string(code),
                pressed: event.state == ElementState::Pressed,
            }),
            PhysicalKey::Unidentified(_) => None,
        },
        WindowEvent::Focused(focused) => Some(HostEvent::Focused(*focused)),
        _ => None,
    }
}

#[derive(Debug, Default)]
struct HostState {
    client_position: Vec2,
    client_origin: Vec2,
    buttons: [ButtonState; 5],
    wheel_notches: f32,
    focused: bool,
    keys: BTreeSet<String>,
}

/// Shared device state, written by the event loop and polled by input handlers.
#[derive(Debug, Default)]
pub struct WinitInputHost {
    state: Mutex<HostState>,
}

impl WinitInputHost {
    /// Creates a host with no focus and the cursor at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one window event. Returns `true` if the host state changed.
    pub fn handle_window_event(&self, event: &WindowEvent) -> bool {
        match translate_window_event(event) {
            Some(event) => {
                self.apply(event);
                true
            }
            None => false,
        }
    }

    /// Applies one already-translated event.
    pub fn apply(&self, event: HostEvent) {
        let mut state = self.lock();
        match event {
            HostEvent::CursorMoved { position } => state.client_position = position,
            HostEvent::Button { button, state: pressed } => {
                state.buttons[button_slot(button)] = pressed;
            }
            HostEvent::Wheel { notches } => state.wheel_notches += notches,
            HostEvent::Key { key_code, pressed } => {
                if pressed {
                    state.keys.insert(key_code);
                } else {
                    state.keys.remove(&key_code);
                }
            }
            HostEvent::Focused(focused) => {
                state.focused = focused;
                if !focused {
                    // Releases are not delivered to an unfocused window.
                    state.keys.clear();
                    state.buttons = Default::default();
                }
            }
            HostEvent::ClientOrigin(origin) => state.client_origin = origin,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl InputHost for WinitInputHost {
    fn raw_pointer(&self) -> RawPointerState {
        let mut state = self.lock();
        let whole = state.wheel_notches.trunc();
        state.wheel_notches -= whole;

        let mut raw = RawPointerState {
            screen_position: state.client_origin + state.client_position,
            wheel: whole as i32,
            ..Default::default()
        };
        for button in MouseButton::ALL {
            raw.set_button(button, state.buttons[button_slot(button)]);
        }
        raw
    }

    fn point_to_client(&self, screen: Vec2) -> Vec2 {
        screen - self.lock().client_origin
    }

    fn is_window_active(&self) -> bool {
        self.lock().focused
    }

    fn pressed_keys(&self) -> Vec<String> {
        self.lock().keys.iter().cloned().collect()
    }
}

fn button_slot(button: MouseButton) -> usize {
    match button {
        MouseButton::Left => 0,
        MouseButton::Middle => 1,
        MouseButton::Right => 2,
        MouseButton::Button1 => 3,
        MouseButton::Button2 => 4,
    }
}

fn map_keycode_to_string(keycode: KeyCode) -> String {
    format!("{keycode:?}")
}

fn map_mouse_button(button: WinitMouseButton) -> Option<MouseButton> {
    match button {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        WinitMouseButton::Right => Some(MouseButton::Right),
        WinitMouseButton::Back => Some(MouseButton::Button1),
        WinitMouseButton::Forward => Some(MouseButton::Button2),
        WinitMouseButton::Other(_) => None,
    }
}
