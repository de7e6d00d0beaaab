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

use super::cursor::CursorGrab;
use super::error::WindowError;
use crate::math::Vec2;

/// A trait that abstracts the behavior of a native OS window.
///
/// Any windowing backend (Winit, SDL2, Glfw, etc.) can implement this trait to be
/// driven by a [`WindowController`](super::WindowController). The cursor methods are
/// raw passthroughs; application code goes through
/// [`CursorState`](super::CursorState) instead.
pub trait NativeWindow: Send + Sync {
    /// Sets the title bar text.
    fn set_title(&self, title: &str);

    /// Returns the outer position of the window on the desktop.
    fn position(&self) -> Vec2;

    /// Moves the window on the desktop.
    fn set_position(&self, position: Vec2);

    /// Returns the physical dimensions (width, height) of the window's inner area.
    fn inner_size(&self) -> (u32, u32);

    /// Requests new inner dimensions. The platform may ignore or adjust the request.
    fn request_inner_size(&self, width: u32, height: u32);

    /// Shows or hides the native cursor image over the window.
    fn set_native_cursor_visible(&self, visible: bool);

    /// Changes how the window grabs the cursor.
    fn set_cursor_grab(&self, grab: CursorGrab) -> Result<(), WindowError>;

    /// Returns `true` while the window has keyboard focus.
    fn is_focused(&self) -> bool;

    /// Tears the native window down.
    fn close(&self);

    /// Switches to the next display mode. Does nothing unless the backend supports it.
    fn cycle_mode(&self) {}
}
