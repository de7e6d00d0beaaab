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

//! Host configuration.
//!
//! Every field has a default, so a configuration file only needs to list what it
//! changes.

use crate::math::Vec2;
use crate::platform::CursorState;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings applied by [`WindowController::setup_window`](crate::platform::WindowController::setup_window).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Title bar text.
    pub title: String,
    /// Initial inner width in physical pixels.
    pub width: u32,
    /// Initial inner height in physical pixels.
    pub height: u32,
    /// Initial outer position; the platform chooses when absent.
    pub position: Option<Vec2>,
    /// Initial cursor mode.
    pub cursor_state: CursorState,
    /// Whether presentation waits for vertical sync.
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Lumen".to_string(),
            width: 1024,
            height: 768,
            position: None,
            cursor_state: CursorState::Visible,
            vsync: true,
        }
    }
}

/// Settings for the input thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// How many times per second the input scheduler is updated.
    pub poll_rate_hz: u32,
    /// Whether the keyboard polling handler is registered.
    pub enable_keyboard: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            poll_rate_hz: 1000,
            enable_keyboard: true,
        }
    }
}

impl InputConfig {
    /// The time between two scheduler updates on the input thread.
    pub fn poll_interval(&self) -> Duration {
        interval_for(self.poll_rate_hz)
    }
}

/// Settings for the frame (update) loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Target number of update frames per second. `0` means unlimited.
    pub update_hz: u32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self { update_hz: 60 }
    }
}

impl FrameConfig {
    /// The target time between two frames, or `None` when unlimited.
    pub fn frame_interval(&self) -> Option<Duration> {
        (self.update_hz > 0).then(|| interval_for(self.update_hz))
    }
}

/// The complete host configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Window settings.
    pub window: WindowConfig,
    /// Input thread settings.
    pub input: InputConfig,
    /// Frame loop settings.
    pub frame: FrameConfig,
}

impl HostConfig {
    /// Load a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a configuration from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }

    /// Save the configuration to a JSON file.
    pub fn to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

fn interval_for(rate_hz: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(rate_hz.max(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = HostConfig::from_json(
            r#"{ "window": { "title": "Test", "cursor_state": "Hidden" }, "input": { "poll_rate_hz": 250 } }"#,
        )
        .unwrap();

        assert_eq!(config.window.title, "Test");
        assert_eq!(config.window.cursor_state, CursorState::Hidden);
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.input.poll_rate_hz, 250);
        assert!(config.input.enable_keyboard);
        assert_eq!(config.frame, FrameConfig::default());
    }

    #[test]
    fn intervals() {
        let input = InputConfig {
            poll_rate_hz: 500,
            ..Default::default()
        };
        assert_eq!(input.poll_interval(), Duration::from_millis(2));

        let zero = InputConfig {
            poll_rate_hz: 0,
            ..Default::default()
        };
        assert_eq!(zero.poll_interval(), Duration::from_secs(1));

        assert_eq!(FrameConfig { update_hz: 0 }.frame_interval(), None);
        assert!(FrameConfig::default().frame_interval().is_some());
    }

    #[test]
    fn file_round_trip() {
        let path = std::env::temp_dir().join(format!("lumen-config-{}.json", std::process::id()));
        let path = path.to_string_lossy().to_string();

        let mut config = HostConfig::default();
        config.window.position = Some(Vec2::new(10.0, 20.0));
        config.to_file(&path).unwrap();

        let loaded = HostConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }
}
