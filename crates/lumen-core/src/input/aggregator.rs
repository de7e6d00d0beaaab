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

//! Folds the snapshots queued by every handler into the current input state.

use super::handler::PendingStates;
use super::state::InputState;
use crate::event::EventBus;

/// Owns the pending-states queue and the aggregate input state.
///
/// Handlers on the input thread push through [`PendingStates`]; the frame thread
/// calls [`update`](Self::update) once per frame. Within one handler, snapshots
/// keep their tick order. Across handlers, arrival order is whatever the queue saw.
#[derive(Debug, Default)]
pub struct InputStateAggregator {
    pending: EventBus<InputState>,
    current: InputState,
}

impl InputStateAggregator {
    /// Creates an aggregator with an empty queue and an empty aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a producer handle for the pending-states queue.
    pub fn pending_states(&self) -> PendingStates {
        PendingStates::new(self.pending.sender())
    }

    /// Removes every queued snapshot, in arrival order.
    pub fn drain(&self) -> Vec<InputState> {
        self.pending.drain()
    }

    /// Folds `entries` into the aggregate; the last present sub-state of each kind wins.
    pub fn fold<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = InputState>,
    {
        for entry in entries {
            self.current.merge(entry);
        }
    }

    /// Drains the queue and folds it. Returns the number of snapshots consumed.
    pub fn update(&mut self) -> usize {
        let entries = self.drain();
        let count = entries.len();
        self.fold(entries);
        if count > 0 {
            log::trace!("Folded {count} pending input states.");
        }
        count
    }

    /// The aggregate input state as of the last fold.
    pub fn current(&self) -> &InputState {
        &self.current
    }

    /// Returns the number of snapshots waiting to be drained.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::state::{KeyboardState, MouseState};
    use crate::math::Vec2;

    fn mouse_at(x: f32) -> InputState {
        InputState::from_mouse(MouseState::new(Vec2::new(x, 0.0)))
    }

    #[test]
    fn update_on_empty_queue_is_a_no_op() {
        let mut aggregator = InputStateAggregator::new();
        assert_eq!(aggregator.update(), 0);
        assert_eq!(aggregator.current(), &InputState::default());
    }

    #[test]
    fn last_present_mouse_wins() {
        let mut aggregator = InputStateAggregator::new();
        let pending = aggregator.pending_states();

        pending.enqueue(mouse_at(1.0));
        pending.enqueue(mouse_at(2.0));
        pending.enqueue(InputState::from_keyboard(KeyboardState::new(["Space"])));
        pending.enqueue(InputState::default());

        assert_eq!(aggregator.pending_len(), 4);
        assert_eq!(aggregator.update(), 4);

        let current = aggregator.current();
        assert_eq!(current.mouse, Some(MouseState::new(Vec2::new(2.0, 0.0))));
        assert!(current.keyboard.as_ref().unwrap().is_pressed("Space"));
    }

    #[test]
    fn aggregate_persists_across_frames() {
        let mut aggregator = InputStateAggregator::new();
        let pending = aggregator.pending_states();

        pending.enqueue(mouse_at(7.0));
        aggregator.update();
        assert_eq!(aggregator.update(), 0);

        assert_eq!(
            aggregator.current().mouse,
            Some(MouseState::new(Vec2::new(7.0, 0.0)))
        );
    }

    #[test]
    fn drain_then_fold_matches_update() {
        let mut aggregator = InputStateAggregator::new();
        let pending = aggregator.pending_states();
        pending.enqueue(mouse_at(3.0));
        pending.enqueue(mouse_at(4.0));

        let drained = aggregator.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(aggregator.pending_len(), 0);

        aggregator.fold(drained);
        assert_eq!(
            aggregator.current().mouse,
            Some(MouseState::new(Vec2::new(4.0, 0.0)))
        );
    }
}
