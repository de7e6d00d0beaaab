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

//! Abstractions over the graphics context owned by a window.

use super::error::WindowError;
use super::version::Version;
use std::sync::Mutex;
use std::thread::{self, ThreadId};

/// The driver strings a context can be queried for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextString {
    /// The context version, e.g. `"4.5.0 NVIDIA 390.12"`.
    Version,
    /// The shading language version, e.g. `"4.50 NVIDIA"`.
    ShadingLanguageVersion,
    /// The renderer (GPU) name.
    Renderer,
    /// The driver vendor.
    Vendor,
    /// The space-separated list of supported extensions.
    Extensions,
}

/// Fixed-function toggles of the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Depth testing.
    DepthTest,
    /// Stencil testing.
    StencilTest,
    /// Color blending.
    Blend,
    /// Scissor testing.
    ScissorTest,
}

/// A trait that abstracts a graphics context bound to a window.
///
/// Calls other than `make_current` are only valid while the context is current on
/// the calling thread; the [`WindowController`](super::WindowController) enforces
/// this through [`ContextAffinity`].
pub trait GraphicsContext {
    /// Makes the context current on the calling thread.
    fn make_current(&mut self) -> Result<(), WindowError>;

    /// Detaches the context from the calling thread.
    fn make_not_current(&mut self) -> Result<(), WindowError>;

    /// Queries a driver string. Returns `None` if the driver reports nothing.
    fn get_string(&self, name: ContextString) -> Option<String>;

    /// Enables or disables a fixed-function capability.
    fn set_capability(&mut self, capability: Capability, enabled: bool);

    /// Presents the back buffer.
    fn swap_buffers(&mut self) -> Result<(), WindowError> {
        Ok(())
    }

    /// Notifies the context that the drawable was resized.
    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// Parsed context information gathered during initialization.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GraphicsInfo {
    /// The context version.
    pub version: Version,
    /// The shading language version, `0.0` if unknown.
    pub shading_language_version: Version,
    /// The renderer name, if reported.
    pub renderer: Option<String>,
    /// The vendor name, if reported.
    pub vendor: Option<String>,
    /// The supported extensions, space-separated, if reported.
    pub extensions: Option<String>,
}

/// Tracks which thread currently holds a graphics context.
///
/// At most one thread holds the context at a time. Ownership moves only through
/// an explicit [`release`](Self::release) followed by an [`acquire`](Self::acquire).
#[derive(Debug, Default)]
pub struct ContextAffinity {
    holder: Mutex<Option<ThreadId>>,
}

impl ContextAffinity {
    /// Creates an affinity record that no thread holds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the context for the calling thread.
    ///
    /// Re-acquiring from the holding thread succeeds; acquiring while another thread
    /// holds the context fails with [`WindowError::ContextBusy`].
    pub fn acquire(&self) -> Result<(), WindowError> {
        let caller = thread::current().id();
        let mut holder = self.holder.lock().unwrap_or_else(|e| e.into_inner());
        match *holder {
            Some(current) if current != caller => Err(WindowError::ContextBusy { holder: current }),
            _ => {
                *holder = Some(caller);
                log::trace!("Graphics context acquired by {caller:?}.");
                Ok(())
            }
        }
    }

    /// Gives up the calling thread's claim on the context.
    pub fn release(&self) -> Result<(), WindowError> {
        let caller = thread::current().id();
        let mut holder = self.holder.lock().unwrap_or_else(|e| e.into_inner());
        if *holder == Some(caller) {
            *holder = None;
            log::trace!("Graphics context released by {caller:?}.");
            Ok(())
        } else {
            Err(WindowError::ContextNotHeld)
        }
    }

    /// Returns the thread currently holding the context, if any.
    pub fn holder(&self) -> Option<ThreadId> {
        *self.holder.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns `true` if the calling thread holds the context.
    pub fn is_held_by_current_thread(&self) -> bool {
        self.holder() == Some(thread::current().id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn acquire_is_exclusive_across_threads() {
        let affinity = Arc::new(ContextAffinity::new());
        affinity.acquire().unwrap();
        affinity.acquire().unwrap();
        assert!(affinity.is_held_by_current_thread());

        let remote = affinity.clone();
        let result = thread::spawn(move || remote.acquire())
            .join()
            .expect("thread panicked");
        assert!(matches!(result, Err(WindowError::ContextBusy { .. })));
    }

    #[test]
    fn transfer_requires_release_then_acquire() {
        let affinity = Arc::new(ContextAffinity::new());
        affinity.acquire().unwrap();
        affinity.release().unwrap();
        assert_eq!(affinity.holder(), None);

        let remote = affinity.clone();
        let remote_id = thread::spawn(move || {
            remote.acquire().unwrap();
            thread::current().id()
        })
        .join()
        .expect("thread panicked");

        assert_eq!(affinity.holder(), Some(remote_id));
        assert!(matches!(
            affinity.release(),
            Err(WindowError::ContextNotHeld)
        ));
    }
}
