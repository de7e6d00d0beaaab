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

//! The owner of the OS window and its graphics context.

use super::cursor::{CursorGrab, CursorState};
use super::error::WindowError;
use super::exit::{CloseOutcome, ExitHandshake};
use super::graphics::{Capability, ContextAffinity, ContextString, GraphicsContext, GraphicsInfo};
use super::version::Version;
use super::window::NativeWindow;
use crate::config::WindowConfig;
use crate::math::Vec2;
use std::sync::Arc;

/// Owns a native window and its graphics context for the lifetime of the process.
///
/// Construction runs the context initialization protocol synchronously and leaves
/// the context released, so that the rendering thread can claim it with
/// [`acquire_context`](Self::acquire_context).
pub struct WindowController<W: NativeWindow, C: GraphicsContext> {
    window: W,
    context: C,
    affinity: Arc<ContextAffinity>,
    info: GraphicsInfo,
    cursor_state: CursorState,
    exit: ExitHandshake,
}

impl<W: NativeWindow, C: GraphicsContext> WindowController<W, C> {
    /// Takes ownership of `window` and `context` and initializes the context.
    ///
    /// # Errors
    /// Fails if the context cannot be made current or if its version string holds no
    /// parseable version. The context is released in either case.
    pub fn new(window: W, mut context: C) -> Result<Self, WindowError> {
        let affinity = Arc::new(ContextAffinity::new());
        affinity.acquire()?;

        if let Err(e) = context.make_current() {
            affinity.release()?;
            return Err(e);
        }

        let initialized = initialize_context(&mut context);

        let released = context.make_not_current();
        affinity.release()?;
        let info = initialized?;
        released?;

        Ok(Self {
            window,
            context,
            affinity,
            info,
            cursor_state: CursorState::Visible,
            exit: ExitHandshake::new(),
        })
    }

    /// Applies the title, size, position and cursor mode from `config`.
    pub fn setup_window(&mut self, config: &WindowConfig) {
        log::info!(
            "Setting up window '{}' ({}x{}, cursor: {:?}).",
            config.title,
            config.width,
            config.height,
            config.cursor_state
        );
        self.set_title(&config.title);
        self.window.request_inner_size(config.width, config.height);
        if let Some(position) = config.position {
            self.set_position(position);
        }
        self.set_cursor_state(config.cursor_state);
    }

    /// Sets the title bar text.
    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }

    /// Returns the window's outer position.
    pub fn position(&self) -> Vec2 {
        self.window.position()
    }

    /// Moves the window.
    pub fn set_position(&self, position: Vec2) {
        self.window.set_position(position);
    }

    /// Returns the inner size of the window.
    pub fn inner_size(&self) -> (u32, u32) {
        self.window.inner_size()
    }

    /// Returns `true` while the window has focus.
    pub fn is_active(&self) -> bool {
        self.window.is_focused()
    }

    /// Switches to the next display mode, if the backend has any.
    pub fn cycle_mode(&self) {
        self.window.cycle_mode();
    }

    /// Returns the current cursor mode.
    pub fn cursor_state(&self) -> CursorState {
        self.cursor_state
    }

    /// Switches the cursor mode and immediately applies it to the native cursor.
    ///
    /// Setting the current mode again re-applies it once.
    pub fn set_cursor_state(&mut self, state: CursorState) {
        log::debug!("Cursor state {:?} -> {:?}.", self.cursor_state, state);
        self.cursor_state = state;

        self.window.set_native_cursor_visible(state.native_visible());
        self.apply_cursor_grab();
    }

    /// Follows a focus change of the native window.
    ///
    /// Losing focus releases any grab so the cursor can leave the window; gaining it
    /// re-applies the current cursor state.
    pub fn focus_changed(&mut self, focused: bool) {
        if focused {
            self.set_cursor_state(self.cursor_state);
        } else if self.cursor_state.grab() != CursorGrab::None {
            log::debug!("Window lost focus, releasing the cursor.");
            if let Err(e) = self.window.set_cursor_grab(CursorGrab::None) {
                log::warn!("Failed to release the cursor grab: {e}");
            }
        }
    }

    fn apply_cursor_grab(&self) {
        let grab = self.cursor_state.grab();
        match self.window.set_cursor_grab(grab) {
            Ok(()) => {}
            Err(e) if grab == CursorGrab::Confined => {
                // Locking instead would freeze the reported pointer position.
                log::warn!("Cursor confinement unavailable ({e}), leaving the cursor free.");
                if let Err(e) = self.window.set_cursor_grab(CursorGrab::None) {
                    log::warn!("Failed to release the cursor grab: {e}");
                }
            }
            Err(e) => log::warn!("Failed to release the cursor grab: {e}"),
        }
    }

    /// Direct access to native cursor visibility is not supported.
    ///
    /// # Errors
    /// Always fails with [`WindowError::UnsupportedCursorAccess`]; use
    /// [`cursor_state`](Self::cursor_state).
    pub fn cursor_visible(&self) -> Result<bool, WindowError> {
        Err(WindowError::UnsupportedCursorAccess {
            property: "cursor_visible",
        })
    }

    /// Direct access to native cursor visibility is not supported.
    ///
    /// # Errors
    /// Always fails with [`WindowError::UnsupportedCursorAccess`]; use
    /// [`set_cursor_state`](Self::set_cursor_state).
    pub fn set_cursor_visible(&mut self, _visible: bool) -> Result<(), WindowError> {
        Err(WindowError::UnsupportedCursorAccess {
            property: "cursor_visible",
        })
    }

    /// Subscribes to close requests. Returning `true` cancels the close.
    pub fn on_exit_requested<F>(&mut self, callback: F)
    where
        F: FnMut() -> bool + Send + 'static,
    {
        self.exit.on_exit_requested(callback);
    }

    /// Subscribes to the terminal "exited" notification.
    pub fn on_exited<F>(&mut self, callback: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.exit.on_exited(callback);
    }

    /// Handles a request to close the window.
    ///
    /// If any "exit requested" subscriber returns `true`, the window stays open.
    /// Otherwise it closes and "exited" fires, exactly once over the controller's life.
    pub fn request_close(&mut self) -> CloseOutcome {
        if self.exit.has_exited() {
            return CloseOutcome::AlreadyClosed;
        }
        if self.exit.should_cancel() {
            log::info!("Window close request was cancelled.");
            return CloseOutcome::Cancelled;
        }

        log::info!("Closing window.");
        self.window.close();
        self.exit.notify_exited();
        CloseOutcome::Closed
    }

    /// Returns `true` once the window has closed.
    pub fn has_exited(&self) -> bool {
        self.exit.has_exited()
    }

    /// Claims the graphics context for the calling thread and makes it current.
    pub fn acquire_context(&mut self) -> Result<&mut C, WindowError> {
        self.affinity.acquire()?;
        if let Err(e) = self.context.make_current() {
            self.affinity.release()?;
            return Err(e);
        }
        Ok(&mut self.context)
    }

    /// Detaches the graphics context from the calling thread.
    pub fn release_context(&mut self) -> Result<(), WindowError> {
        if !self.affinity.is_held_by_current_thread() {
            return Err(WindowError::ContextNotHeld);
        }
        let released = self.context.make_not_current();
        self.affinity.release()?;
        released
    }

    /// Returns the context if the calling thread holds it.
    pub fn context_mut(&mut self) -> Result<&mut C, WindowError> {
        if self.affinity.is_held_by_current_thread() {
            Ok(&mut self.context)
        } else {
            Err(WindowError::ContextNotHeld)
        }
    }

    /// Returns the affinity record of the graphics context.
    pub fn affinity(&self) -> &Arc<ContextAffinity> {
        &self.affinity
    }

    /// Returns the context information gathered during initialization.
    pub fn graphics_info(&self) -> &GraphicsInfo {
        &self.info
    }

    /// The parsed context version.
    pub fn context_version(&self) -> Version {
        self.info.version
    }

    /// The parsed shading language version, `0.0` if unknown.
    pub fn shading_language_version(&self) -> Version {
        self.info.shading_language_version
    }

    /// Returns the native window.
    pub fn window(&self) -> &W {
        &self.window
    }
}

/// Reads the context's version strings and applies the baseline state.
///
/// Must run with the context current.
fn initialize_context<C: GraphicsContext>(context: &mut C) -> Result<GraphicsInfo, WindowError> {
    let version_string = context.get_string(ContextString::Version).unwrap_or_default();
    let version = Version::from_driver_string(&version_string)?;

    let shading_string = context
        .get_string(ContextString::ShadingLanguageVersion)
        .unwrap_or_default();
    let shading_language_version = if shading_string.trim().is_empty() {
        Version::ZERO
    } else {
        Version::from_driver_string(&shading_string).unwrap_or_else(|e| {
            log::error!("Couldn't determine the shading language version from '{shading_string}': {e}");
            Version::ZERO
        })
    };

    context.set_capability(Capability::DepthTest, false);
    context.set_capability(Capability::StencilTest, false);
    context.set_capability(Capability::Blend, true);
    context.set_capability(Capability::ScissorTest, true);

    let renderer = context.get_string(ContextString::Renderer);
    let vendor = context.get_string(ContextString::Vendor);
    let extensions = context.get_string(ContextString::Extensions);

    log::info!("Graphics context initialized.");
    log::info!("  Version:                 {version_string}");
    log::info!("  Renderer:                {}", renderer.as_deref().unwrap_or("unknown"));
    log::info!("  Shading language:        {shading_string}");
    log::info!("  Vendor:                  {}", vendor.as_deref().unwrap_or("unknown"));
    log::info!("  Extensions:              {}", extensions.as_deref().unwrap_or("none"));

    Ok(GraphicsInfo {
        version,
        shading_language_version,
        renderer,
        vendor,
        extensions,
    })
}
