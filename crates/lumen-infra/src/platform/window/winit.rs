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

//! A `winit`-based implementation of the `NativeWindow` trait.

use crate::graphics::gl::GlowContext;
use anyhow::{anyhow, Context, Result};
use glutin::config::{ConfigTemplateBuilder, GlConfig};
use glutin::context::{ContextApi, ContextAttributesBuilder, NotCurrentGlContext};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin_winit::{DisplayBuilder, GlWindow};
use lumen_core::config::WindowConfig;
use lumen_core::math::Vec2;
use lumen_core::platform::{CursorGrab, NativeWindow, WindowError};
use raw_window_handle::HasWindowHandle;
use std::sync::Arc;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::window::{CursorGrabMode, Fullscreen, Window, WindowId};

/// A wrapper around a `winit::window::Window` that implements [`NativeWindow`].
///
/// Cloning shares the underlying window.
#[derive(Debug, Clone)]
pub struct WinitWindow {
    inner: Arc<Window>,
}

impl WinitWindow {
    /// The `winit` identifier of the window.
    pub fn id(&self) -> WindowId {
        self.inner.id()
    }

    /// The desktop position of the client area's top-left corner.
    pub fn client_origin(&self) -> Vec2 {
        self.inner
            .inner_position()
            .map(|p| Vec2::new(p.x as f32, p.y as f32))
            .unwrap_or(Vec2::ZERO)
    }

    /// Requests a redraw on the next event-loop iteration.
    pub fn request_redraw(&self) {
        self.inner.request_redraw();
    }

    /// The underlying `winit` window.
    pub fn raw(&self) -> &Arc<Window> {
        &self.inner
    }
}

impl NativeWindow for WinitWindow {
    fn set_title(&self, title: &str) {
        self.inner.set_title(title);
    }

    fn position(&self) -> Vec2 {
        self.inner
            .outer_position()
            .map(|p| Vec2::new(p.x as f32, p.y as f32))
            .unwrap_or(Vec2::ZERO)
    }

    fn set_position(&self, position: Vec2) {
        self.inner
            .set_outer_position(PhysicalPosition::new(position.x as i32, position.y as i32));
    }

    fn inner_size(&self) -> (u32, u32) {
        let size = self.inner.inner_size();
        (size.width, size.height)
    }

    fn request_inner_size(&self, width: u32, height: u32) {
        if let Some(applied) = self.inner.request_inner_size(PhysicalSize::new(width, height)) {
            log::trace!("Window resized immediately to {}x{}.", applied.width, applied.height);
        }
    }

    fn set_native_cursor_visible(&self, visible: bool) {
        self.inner.set_cursor_visible(visible);
    }

    fn set_cursor_grab(&self, grab: CursorGrab) -> Result<(), WindowError> {
        let mode = match grab {
            CursorGrab::None => CursorGrabMode::None,
            CursorGrab::Confined => CursorGrabMode::Confined,
        };
        self.inner
            .set_cursor_grab(mode)
            .map_err(|e| WindowError::Backend(e.to_string()))
    }

    fn is_focused(&self) -> bool {
        self.inner.has_focus()
    }

    fn close(&self) {
        // The OS window is destroyed when the last handle drops.
        self.inner.set_visible(false);
    }

    fn cycle_mode(&self) {
        let next = match self.inner.fullscreen() {
            Some(_) => None,
            None => Some(Fullscreen::Borderless(None)),
        };
        log::info!(
            "Switching to {} mode.",
            if next.is_some() { "borderless fullscreen" } else { "windowed" }
        );
        self.inner.set_fullscreen(next);
    }
}

/// Builds a [`WinitWindow`] together with its OpenGL context.
pub struct WinitWindowBuilder {
    config: WindowConfig,
}

impl WinitWindowBuilder {
    /// Creates a builder from a window configuration.
    pub fn new(config: WindowConfig) -> Self {
        Self { config }
    }

    /// Creates the window, picks a GL configuration and creates a context for it.
    ///
    /// The returned context is current on the calling thread.
    pub fn build(self, event_loop: &ActiveEventLoop) -> Result<(WinitWindow, GlowContext)> {
        log::info!(
            "Building window '{}' ({}x{}).",
            self.config.title,
            self.config.width,
            self.config.height
        );

        let attributes = Window::default_attributes()
            .with_title(self.config.title.as_str())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height))
            .with_visible(true);

        let template = ConfigTemplateBuilder::new().with_alpha_size(8);
        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(event_loop, template, |configs| {
                // glutin only calls the picker with a non-empty set.
                configs
                    .reduce(|best, config| {
                        if config.num_samples() > best.num_samples() {
                            config
                        } else {
                            best
                        }
                    })
                    .expect("glutin returned no GL configuration")
            })
            .map_err(|e| anyhow!("Failed to create the window and GL display: {e}"))?;
        let window = window.context("The GL display did not create a window")?;

        let raw_handle = window
            .window_handle()
            .context("The window has no native handle")?
            .as_raw();
        let display = gl_config.display();
        let desktop = ContextAttributesBuilder::new().build(Some(raw_handle));
        let gles = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::Gles(None))
            .build(Some(raw_handle));

        let not_current = unsafe {
            display
                .create_context(&gl_config, &desktop)
                .or_else(|_| display.create_context(&gl_config, &gles))
        }
        .context("Failed to create a GL context")?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .context("Failed to describe the window surface")?;
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attributes) }
            .context("Failed to create the window surface")?;
        let context = not_current
            .make_current(&surface)
            .context("Failed to make the GL context current")?;

        let gl = unsafe { glow::Context::from_loader_function_cstr(|name| display.get_proc_address(name)) };
        let context = GlowContext::new(gl, context, surface);
        if let Err(e) = context.set_vsync(self.config.vsync) {
            log::warn!("Could not change vsync: {e}");
        }

        log::info!("Winit window created (id: {:?}).", window.id());
        Ok((
            WinitWindow {
                inner: Arc::new(window),
            },
            context,
        ))
    }
}

impl Default for WinitWindowBuilder {
    fn default() -> Self {
        Self::new(WindowConfig::default())
    }
}
