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

//! An OpenGL context built with `glutin` and driven through `glow`.

use glow::HasContext;
use glutin::context::{PossiblyCurrentContext, PossiblyCurrentGlContext};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use lumen_core::platform::{Capability, ContextString, GraphicsContext, WindowError};
use std::fmt;
use std::num::NonZeroU32;

/// A window-bound OpenGL context.
pub struct GlowContext {
    gl: glow::Context,
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
}

impl fmt::Debug for GlowContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlowContext")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

impl GlowContext {
    pub(crate) fn new(
        gl: glow::Context,
        context: PossiblyCurrentContext,
        surface: Surface<WindowSurface>,
    ) -> Self {
        Self {
            gl,
            context,
            surface,
        }
    }

    /// Turns vertical sync on or off. The context must be current.
    pub fn set_vsync(&self, enabled: bool) -> Result<(), WindowError> {
        let interval = if enabled {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        self.surface
            .set_swap_interval(&self.context, interval)
            .map_err(backend)
    }

    /// Clears the color buffer. The context must be current.
    pub fn clear(&self, red: f32, green: f32, blue: f32) {
        unsafe {
            self.gl.clear_color(red, green, blue, 1.0);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    /// Raw access to the `glow` function table.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }
}

impl GraphicsContext for GlowContext {
    fn make_current(&mut self) -> Result<(), WindowError> {
        self.context.make_current(&self.surface).map_err(backend)
    }

    fn make_not_current(&mut self) -> Result<(), WindowError> {
        self.context.make_not_current_in_place().map_err(backend)
    }

    fn get_string(&self, name: ContextString) -> Option<String> {
        let parameter = match name {
            ContextString::Version => glow::VERSION,
            ContextString::ShadingLanguageVersion => glow::SHADING_LANGUAGE_VERSION,
            ContextString::Renderer => glow::RENDERER,
            ContextString::Vendor => glow::VENDOR,
            // Core profiles only expose extensions one index at a time.
            ContextString::Extensions => {
                let mut extensions: Vec<_> = self.gl.supported_extensions().iter().cloned().collect();
                extensions.sort();
                return (!extensions.is_empty()).then(|| extensions.join(" "));
            }
        };
        let value = unsafe { self.gl.get_parameter_string(parameter) };
        (!value.is_empty()).then_some(value)
    }

    fn set_capability(&mut self, capability: Capability, enabled: bool) {
        let parameter = match capability {
            Capability::DepthTest => glow::DEPTH_TEST,
            Capability::StencilTest => glow::STENCIL_TEST,
            Capability::Blend => glow::BLEND,
            Capability::ScissorTest => glow::SCISSOR_TEST,
        };
        unsafe {
            if enabled {
                self.gl.enable(parameter);
            } else {
                self.gl.disable(parameter);
            }
        }
    }

    fn swap_buffers(&mut self) -> Result<(), WindowError> {
        self.surface.swap_buffers(&self.context).map_err(backend)
    }

    fn resize(&mut self, width: u32, height: u32) {
        if let (Some(width), Some(height)) = (NonZeroU32::new(width), NonZeroU32::new(height)) {
            self.surface.resize(&self.context, width, height);
            unsafe {
                self.gl.viewport(0, 0, width.get() as i32, height.get() as i32);
                self.gl.scissor(0, 0, width.get() as i32, height.get() as i32);
            }
        }
    }
}

fn backend(error: glutin::error::Error) -> WindowError {
    WindowError::Backend(error.to_string())
}
