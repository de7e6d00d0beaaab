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

//! Pointer and keyboard polling on top of `winit` window events.
//!
//! [`WinitInputHost`] collects the window's events on the event-loop thread; the
//! polling handlers read it from the input thread once per scheduler tick.

mod host;
mod keyboard;
mod mouse;

pub use self::host::{translate_window_event, HostEvent, WinitInputHost, PIXELS_PER_WHEEL_NOTCH};
pub use self::keyboard::{poll_keyboard, KeyboardPollingHandler, KEYBOARD_POLLING_PRIORITY};
pub use self::mouse::{poll_cursor, CursorPollingHandler, CURSOR_POLLING_PRIORITY};
