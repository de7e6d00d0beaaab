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

//! Process-wide logger setup.

use anyhow::{Context, Result};
use env_logger::{Builder, Env};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

/// Installs `env_logger` as the global logger.
///
/// `RUST_LOG` overrides `default_filter`. Noisy windowing and GL backend modules
/// are capped at `warn`.
///
/// # Errors
/// Fails if a global logger was already installed.
pub fn init(default_filter: &str) -> Result<()> {
    Builder::from_env(Env::default().default_filter_or(default_filter))
        .filter_module("winit", log::LevelFilter::Warn)
        .filter_module("glutin", log::LevelFilter::Warn)
        .format_timestamp_millis()
        .try_init()
        .context("A global logger is already installed")
}

/// Installs the test logger. Safe to call from every test.
pub fn init_for_tests() {
    let _ = Builder::from_env(Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        init_for_tests();
        log::debug!("Logger installed for tests.");
        assert!(init(DEFAULT_FILTER).is_err());
    }
}
