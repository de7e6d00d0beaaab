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

//! Errors raised by the window controller and its graphics context.

use super::version::VersionParseError;
use std::fmt;
use std::thread::ThreadId;

/// An error related to the window or its graphics context.
#[derive(Debug)]
pub enum WindowError {
    /// The context version string could not be parsed. Initialization cannot continue.
    ContextVersion(VersionParseError),
    /// A cursor property that is owned by the [`CursorState`](super::CursorState)
    /// state machine was accessed directly.
    UnsupportedCursorAccess {
        /// The name of the property that was accessed.
        property: &'static str,
    },
    /// The graphics context is held by another thread.
    ContextBusy {
        /// The thread currently holding the context.
        holder: ThreadId,
    },
    /// The calling thread tried to release a context it does not hold.
    ContextNotHeld,
    /// The native windowing or graphics backend reported an error.
    Backend(String),
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::ContextVersion(e) => {
                write!(f, "Failed to determine the graphics context version: {e}")
            }
            WindowError::UnsupportedCursorAccess { property } => write!(
                f,
                "'{property}' is not supported. Use 'cursor_state' instead."
            ),
            WindowError::ContextBusy { holder } => {
                write!(f, "Graphics context is already held by thread {holder:?}")
            }
            WindowError::ContextNotHeld => {
                write!(f, "Graphics context is not held by the calling thread")
            }
            WindowError::Backend(msg) => write!(f, "Window backend error: {msg}"),
        }
    }
}

impl std::error::Error for WindowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WindowError::ContextVersion(e) => Some(e),
            _ => None,
        }
    }
}

impl From<VersionParseError> for WindowError {
    fn from(e: VersionParseError) -> Self {
        WindowError::ContextVersion(e)
    }
}
