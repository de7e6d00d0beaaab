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

// Lumen Sandbox
// Opens a window and reports what the input pipeline sees.

use anyhow::{anyhow, Result};
use lumen_sdk::prelude::*;

struct SandboxApp {
    buttons_down: bool,
    fullscreen_held: bool,
    last_position: Vec2,
    close_attempts: u32,
}

impl Application for SandboxApp {
    fn new(context: AppContext<'_>) -> Self {
        let graphics = context.graphics;
        log::info!(
            "Sandbox ready on OpenGL {} (GLSL {}), renderer {}.",
            graphics.version,
            graphics.shading_language_version,
            graphics.renderer.as_deref().unwrap_or("unknown")
        );
        Self {
            buttons_down: false,
            fullscreen_held: false,
            last_position: Vec2::ZERO,
            close_attempts: 0,
        }
    }

    fn update(&mut self, frame: &mut FrameContext<'_>) {
        let Some(mouse) = frame.input().mouse.clone() else {
            return;
        };

        if mouse.position() != self.last_position {
            self.last_position = mouse.position();
            log::trace!("Pointer at {:?}.", self.last_position);
        }

        if mouse.wheel_delta() != 0 {
            log::info!("Wheel moved by {} notch(es).", mouse.wheel_delta());
        }

        // Cycle the cursor on each fresh click.
        let down = mouse.has_any_button_pressed();
        if down && !self.buttons_down {
            let next = frame.cursor_state().next();
            log::info!("Buttons {:?} pressed, cursor is now {next:?}.", mouse.pressed_buttons());
            frame.set_cursor_state(next);
        }
        self.buttons_down = down;

        if let Some(keyboard) = frame.input().keyboard.clone() {
            if keyboard.is_pressed("Escape") {
                frame.request_exit();
            }
            let fullscreen = keyboard.is_pressed("F11");
            if fullscreen && !self.fullscreen_held {
                frame.cycle_mode();
            }
            self.fullscreen_held = fullscreen;
        }

        let shade = if frame.is_window_active() { 0.18 } else { 0.08 };
        frame.set_clear_color(shade, shade, shade + 0.04);
    }

    fn exit_requested(&mut self) -> bool {
        self.close_attempts += 1;
        if self.close_attempts == 1 {
            log::info!("Close again to quit.");
            return true;
        }
        false
    }
}

fn main() -> Result<()> {
    lumen_telemetry::logging::init(lumen_telemetry::logging::DEFAULT_FILTER)?;

    let config = match std::env::args().nth(1) {
        Some(path) => HostConfig::from_file(&path)
            .map_err(|e| anyhow!("Failed to read configuration '{path}': {e}"))?,
        None => HostConfig::default(),
    };

    Engine::run::<SandboxApp>(config)?;
    Ok(())
}
