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

//! Polling-driven input acquisition and per-frame aggregation.
//!
//! Handlers ([`InputHandler`]) run on the input thread's [`Scheduler`](crate::scheduler::Scheduler)
//! and queue immutable [`InputState`] snapshots. The frame thread drains the queue
//! through an [`InputStateAggregator`] once per frame.

pub mod aggregator;
pub mod handler;
pub mod host;
pub mod registry;
pub mod state;

pub use self::aggregator::InputStateAggregator;
pub use self::handler::{InputContext, InputHandler, PendingStates, PollRegistration};
pub use self::host::{ButtonState, InputHost, RawPointerState};
pub use self::registry::{HandlerRegistry, RegistrationReport};
pub use self::state::{InputState, KeyboardState, MouseButton, MouseState};
