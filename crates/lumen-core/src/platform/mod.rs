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

//! Provides abstractions over the native window and its graphics context.
//!
//! Backends implement [`NativeWindow`] and [`GraphicsContext`]; the
//! [`WindowController`] drives them with the cursor state machine, the context
//! initialization protocol and the cancellable close protocol.

pub mod controller;
pub mod cursor;
pub mod error;
pub mod exit;
pub mod graphics;
pub mod version;
pub mod window;

pub use controller::WindowController;
pub use cursor::{CursorGrab, CursorState};
pub use error::WindowError;
pub use exit::{CloseOutcome, ExitHandshake};
pub use graphics::{Capability, ContextAffinity, ContextString, GraphicsContext, GraphicsInfo};
pub use version::{Version, VersionParseError};
pub use window::NativeWindow;
