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

//! The OS cursor modes supported by the window controller.

use serde::{Deserialize, Serialize};

/// Describes the supported states of the OS cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CursorState {
    /// The OS cursor is always visible and can move anywhere.
    #[default]
    Visible,
    /// The OS cursor is hidden while hovering the window, but can still move anywhere.
    Hidden,
    /// The OS cursor is hidden while hovering the window. It is confined to the window
    /// while the window is focused and can move freely otherwise.
    HiddenAndConfined,
}

/// How the native cursor is grabbed by the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorGrab {
    /// No grab; the cursor moves freely.
    #[default]
    None,
    /// The cursor cannot leave the window.
    Confined,
}

impl CursorState {
    /// Every state, in declaration order.
    pub const ALL: [CursorState; 3] = [
        CursorState::Visible,
        CursorState::Hidden,
        CursorState::HiddenAndConfined,
    ];

    /// Whether the native cursor image is shown in this state.
    pub fn native_visible(self) -> bool {
        matches!(self, CursorState::Visible)
    }

    /// The grab requested in this state.
    pub fn grab(self) -> CursorGrab {
        match self {
            CursorState::Visible | CursorState::Hidden => CursorGrab::None,
            CursorState::HiddenAndConfined => CursorGrab::Confined,
        }
    }

    /// The state that follows this one when cycling.
    pub fn next(self) -> Self {
        match self {
            CursorState::Visible => CursorState::Hidden,
            CursorState::Hidden => CursorState::HiddenAndConfined,
            CursorState::HiddenAndConfined => CursorState::Visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_mapping() {
        assert!(CursorState::Visible.native_visible());
        assert!(!CursorState::Hidden.native_visible());
        assert!(!CursorState::HiddenAndConfined.native_visible());

        assert_eq!(CursorState::Visible.grab(), CursorGrab::None);
        assert_eq!(CursorState::Hidden.grab(), CursorGrab::None);
        assert_eq!(CursorState::HiddenAndConfined.grab(), CursorGrab::Confined);
    }

    #[test]
    fn cycling_visits_every_state() {
        let mut state = CursorState::default();
        let mut seen = Vec::new();
        for _ in 0..CursorState::ALL.len() {
            seen.push(state);
            state = state.next();
        }
        assert_eq!(seen, CursorState::ALL.to_vec());
        assert_eq!(state, CursorState::Visible);
    }

    #[test]
    fn serializes_by_variant_name() {
        let json = serde_json::to_string(&CursorState::HiddenAndConfined).unwrap();
        assert_eq!(json, "\"HiddenAndConfined\"");
        let back: CursorState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CursorState::HiddenAndConfined);
    }
}
