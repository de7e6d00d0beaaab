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

//! The host contract consumed by polling input handlers.

use super::state::MouseButton;
use crate::math::Vec2;

/// The raw state of one physical button as reported by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    /// The button is up.
    #[default]
    Released,
    /// The button is held down.
    Pressed,
}

impl ButtonState {
    /// Returns `true` for [`ButtonState::Pressed`].
    pub fn is_pressed(self) -> bool {
        self == ButtonState::Pressed
    }
}

impl From<bool> for ButtonState {
    fn from(pressed: bool) -> Self {
        if pressed {
            ButtonState::Pressed
        } else {
            ButtonState::Released
        }
    }
}

/// The pointer exactly as the OS reports it, before any window-level filtering.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawPointerState {
    /// Absolute cursor position in screen coordinates.
    pub screen_position: Vec2,
    /// Left button.
    pub left: ButtonState,
    /// Middle button.
    pub middle: ButtonState,
    /// Right button.
    pub right: ButtonState,
    /// First extra button.
    pub button1: ButtonState,
    /// Second extra button.
    pub button2: ButtonState,
    /// Accumulated wheel value since the last poll.
    pub wheel: i32,
}

impl RawPointerState {
    /// Returns the raw state of `button`.
    pub fn button(&self, button: MouseButton) -> ButtonState {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
            MouseButton::Button1 => self.button1,
            MouseButton::Button2 => self.button2,
        }
    }

    /// Sets the raw state of `button`.
    pub fn set_button(&mut self, button: MouseButton, state: ButtonState) {
        let slot = match button {
            MouseButton::Left => &mut self.left,
            MouseButton::Middle => &mut self.middle,
            MouseButton::Right => &mut self.right,
            MouseButton::Button1 => &mut self.button1,
            MouseButton::Button2 => &mut self.button2,
        };
        *slot = state;
    }

    /// Returns `true` if at least one button is physically down.
    pub fn is_any_button_down(&self) -> bool {
        MouseButton::ALL
            .iter()
            .any(|&button| self.button(button).is_pressed())
    }
}

/// What a polling handler needs from the host: raw device state and the window's
/// coordinate space and focus.
///
/// Implementations are read from the input thread while the window thread updates
/// them, so they must be `Send + Sync` and every call must return promptly.
pub trait InputHost: Send + Sync {
    /// Returns the current raw pointer state. Reading it consumes the wheel accumulator.
    fn raw_pointer(&self) -> RawPointerState;

    /// Converts a screen-space point into the window's client space.
    fn point_to_client(&self, screen: Vec2) -> Vec2;

    /// Returns `true` while the window is active (focused).
    fn is_window_active(&self) -> bool;

    /// Returns the physical key codes currently held down.
    fn pressed_keys(&self) -> Vec<String> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_button_down_tracks_every_button() {
        let mut raw = RawPointerState::default();
        assert!(!raw.is_any_button_down());

        for button in MouseButton::ALL {
            raw.set_button(button, ButtonState::Pressed);
            assert!(raw.is_any_button_down());
            assert!(raw.button(button).is_pressed());
            raw.set_button(button, ButtonState::Released);
        }
        assert!(!raw.is_any_button_down());
    }
}
