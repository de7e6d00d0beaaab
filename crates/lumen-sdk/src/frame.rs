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

use lumen_core::input::InputState;
use lumen_core::math::Vec2;
use lumen_core::platform::{CursorState, GraphicsInfo, WindowController};
use lumen_infra::{GlowContext, WinitWindow};
use std::time::Duration;

/// The window controller type the run loop drives.
pub type HostWindow = WindowController<WinitWindow, GlowContext>;

/// Everything an [`Application`](crate::Application) sees during one update.
pub struct FrameContext<'a> {
    pub(crate) input: &'a InputState,
    pub(crate) window: &'a mut HostWindow,
    pub(crate) frame_number: u64,
    pub(crate) delta: Duration,
    pub(crate) exit: &'a mut bool,
    pub(crate) clear_color: &'a mut [f32; 3],
}

impl FrameContext<'_> {
    /// The aggregate input state folded at the start of this frame.
    pub fn input(&self) -> &InputState {
        self.input
    }

    /// The number of frames run before this one.
    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Time since the previous frame.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// The current cursor mode.
    pub fn cursor_state(&self) -> CursorState {
        self.window.cursor_state()
    }

    /// Switches the cursor mode.
    pub fn set_cursor_state(&mut self, state: CursorState) {
        self.window.set_cursor_state(state);
    }

    /// Sets the window title.
    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }

    /// The window's desktop position.
    pub fn window_position(&self) -> Vec2 {
        self.window.position()
    }

    /// Moves the window.
    pub fn set_window_position(&self, position: Vec2) {
        self.window.set_position(position);
    }

    /// Switches to the next display mode.
    pub fn cycle_mode(&self) {
        self.window.cycle_mode();
    }

    /// Returns `true` while the window has focus.
    pub fn is_window_active(&self) -> bool {
        self.window.is_active()
    }

    /// The graphics context details gathered at startup.
    pub fn graphics_info(&self) -> &GraphicsInfo {
        self.window.graphics_info()
    }

    /// Sets the color the frame is cleared to.
    pub fn set_clear_color(&mut self, red: f32, green: f32, blue: f32) {
        *self.clear_color = [red, green, blue];
    }

    /// Closes the window after this frame. Unlike a user close, this is not
    /// offered to [`Application::exit_requested`](crate::Application::exit_requested).
    pub fn request_exit(&mut self) {
        *self.exit = true;
    }
}
