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

//! Immutable input snapshots.

use crate::math::Vec2;
use std::collections::BTreeSet;

/// A mouse button recognised by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MouseButton {
    /// The left mouse button.
    Left,
    /// The middle mouse button (usually the wheel).
    Middle,
    /// The right mouse button.
    Right,
    /// The first extra button (typically "back", on the side).
    Button1,
    /// The second extra button (typically "forward", on the side).
    Button2,
}

impl MouseButton {
    /// Every button, in declaration order.
    pub const ALL: [MouseButton; 5] = [
        MouseButton::Left,
        MouseButton::Middle,
        MouseButton::Right,
        MouseButton::Button1,
        MouseButton::Button2,
    ];
}

/// A snapshot of the pointer at one point in time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MouseState {
    position: Vec2,
    wheel_delta: i32,
    pressed: BTreeSet<MouseButton>,
}

impl MouseState {
    /// Creates a snapshot at `position` with no buttons pressed and no wheel motion.
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Returns a copy of this snapshot with the given wheel delta.
    pub fn with_wheel_delta(mut self, wheel_delta: i32) -> Self {
        self.wheel_delta = wheel_delta;
        self
    }

    /// Returns a copy of this snapshot with `button` added to the pressed set.
    pub fn with_pressed(mut self, button: MouseButton) -> Self {
        self.pressed.insert(button);
        self
    }

    /// The cursor position, in window-client coordinates.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// The wheel delta reported for this snapshot.
    pub fn wheel_delta(&self) -> i32 {
        self.wheel_delta
    }

    /// The set of buttons held down.
    pub fn pressed_buttons(&self) -> &BTreeSet<MouseButton> {
        &self.pressed
    }

    /// Returns `true` if `button` is held down.
    pub fn is_pressed(&self, button: MouseButton) -> bool {
        self.pressed.contains(&button)
    }

    /// Returns `true` if any button is held down.
    pub fn has_any_button_pressed(&self) -> bool {
        !self.pressed.is_empty()
    }
}

/// A snapshot of the keyboard at one point in time.
///
/// Keys are identified by their physical key-code name (e.g. `"KeyW"`, `"Space"`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyboardState {
    pressed: BTreeSet<String>,
}

impl KeyboardState {
    /// Creates a snapshot from the set of held keys.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pressed: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// The set of held keys.
    pub fn pressed_keys(&self) -> &BTreeSet<String> {
        &self.pressed
    }

    /// Returns `true` if `key_code` is held down.
    pub fn is_pressed(&self, key_code: &str) -> bool {
        self.pressed.contains(key_code)
    }
}

/// One handler's contribution for one tick, or the folded aggregate of many.
///
/// Each sub-state is optional: a handler only fills in the devices it polls.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputState {
    /// The pointer sub-state, if any.
    pub mouse: Option<MouseState>,
    /// The keyboard sub-state, if any.
    pub keyboard: Option<KeyboardState>,
}

impl InputState {
    /// An entry carrying only a mouse snapshot.
    pub fn from_mouse(mouse: MouseState) -> Self {
        Self {
            mouse: Some(mouse),
            keyboard: None,
        }
    }

    /// An entry carrying only a keyboard snapshot.
    pub fn from_keyboard(keyboard: KeyboardState) -> Self {
        Self {
            mouse: None,
            keyboard: Some(keyboard),
        }
    }

    /// Overwrites every sub-state that `entry` carries; absent ones are left untouched.
    pub fn merge(&mut self, entry: InputState) {
        if let Some(mouse) = entry.mouse {
            self.mouse = Some(mouse);
        }
        if let Some(keyboard) = entry.keyboard {
            self.keyboard = Some(keyboard);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_overwrites_present_fields_only() {
        let mut aggregate = InputState::from_mouse(MouseState::new(Vec2::new(1.0, 1.0)));

        aggregate.merge(InputState::from_keyboard(KeyboardState::new(["KeyA"])));
        assert_eq!(
            aggregate.mouse.as_ref().map(MouseState::position),
            Some(Vec2::new(1.0, 1.0))
        );
        assert!(aggregate.keyboard.as_ref().unwrap().is_pressed("KeyA"));

        aggregate.merge(InputState::from_mouse(MouseState::new(Vec2::new(5.0, 6.0))));
        assert_eq!(
            aggregate.mouse.as_ref().map(MouseState::position),
            Some(Vec2::new(5.0, 6.0))
        );
        assert!(aggregate.keyboard.is_some());

        aggregate.merge(InputState::default());
        assert!(aggregate.mouse.is_some());
        assert!(aggregate.keyboard.is_some());
    }

    #[test]
    fn mouse_state_builders() {
        let state = MouseState::new(Vec2::ZERO)
            .with_pressed(MouseButton::Right)
            .with_pressed(MouseButton::Left)
            .with_wheel_delta(-3);

        assert!(state.is_pressed(MouseButton::Left));
        assert!(state.is_pressed(MouseButton::Right));
        assert!(!state.is_pressed(MouseButton::Middle));
        assert_eq!(state.wheel_delta(), -3);
        let order: Vec<_> = state.pressed_buttons().iter().copied().collect();
        assert_eq!(order, vec![MouseButton::Left, MouseButton::Right]);
    }
}
