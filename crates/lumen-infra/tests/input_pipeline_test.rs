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

use lumen_core::input::{
    ButtonState, HandlerRegistry, InputContext, InputHandler, InputStateAggregator, MouseButton,
};
use lumen_core::math::Vec2;
use lumen_core::scheduler::{ManualClock, Scheduler};
use lumen_core::telemetry::ids;
use lumen_infra::platform::input::{
    CursorPollingHandler, HostEvent, KeyboardPollingHandler, WinitInputHost,
};
use lumen_telemetry::{CounterHandle, MetricsRegistry};
use std::sync::Arc;

struct Pipeline {
    host: Arc<WinitInputHost>,
    scheduler: Scheduler,
    aggregator: InputStateAggregator,
    registry: HandlerRegistry,
    mouse_events: CounterHandle,
}

fn pipeline(keyboard: bool) -> Pipeline {
    let metrics = MetricsRegistry::new();
    let mouse_events = metrics
        .register_counter(ids::mouse_events(), "Pointer polling ticks")
        .unwrap();
    let keyboard_events = metrics
        .register_counter(ids::keyboard_events(), "Keyboard polling ticks")
        .unwrap();

    let host = Arc::new(WinitInputHost::new());
    let scheduler = Scheduler::with_clock(Arc::new(ManualClock::new()));
    let aggregator = InputStateAggregator::new();

    let mut registry = HandlerRegistry::new();
    registry.register(Box::new(CursorPollingHandler::new(Arc::new(mouse_events.clone()))));
    if keyboard {
        registry.register(Box::new(KeyboardPollingHandler::new(Arc::new(keyboard_events))));
    }

    let context = InputContext {
        host: host.clone(),
        scheduler: scheduler.clone(),
        pending: aggregator.pending_states(),
    };
    let report = registry.initialize_all(&context);
    assert!(report.all_initialized());

    Pipeline {
        host,
        scheduler,
        aggregator,
        registry,
        mouse_events,
    }
}

#[test]
fn test_every_tick_enqueues_and_counts() {
    // --- 1. ARRANGE ---
    let mut p = pipeline(false);
    p.host.apply(HostEvent::CursorMoved {
        position: Vec2::new(12.0, 34.0),
    });

    // --- 2. ACT ---
    for _ in 0..3 {
        p.scheduler.update().unwrap();
    }

    // --- 3. ASSERT ---
    assert_eq!(p.aggregator.pending_len(), 3);
    assert_eq!(p.mouse_events.get().unwrap(), 3);
    assert_eq!(p.aggregator.update(), 3);

    let mouse = p.aggregator.current().mouse.as_ref().expect("mouse state");
    assert_eq!(mouse.position(), Vec2::new(12.0, 34.0));
    assert!(p.aggregator.current().keyboard.is_none());
}

#[test]
fn test_focus_gates_buttons_and_wheel() {
    let mut p = pipeline(false);
    p.host.apply(HostEvent::Button {
        button: MouseButton::Left,
        state: ButtonState::Pressed,
    });
    p.host.apply(HostEvent::Wheel { notches: 2.0 });

    // Unfocused: nothing but the position gets through.
    p.scheduler.update().unwrap();
    p.aggregator.update();
    let mouse = p.aggregator.current().mouse.clone().unwrap();
    assert_eq!(mouse.wheel_delta(), 0);
    assert!(!mouse.has_any_button_pressed());

    p.host.apply(HostEvent::Focused(true));
    p.host.apply(HostEvent::Button {
        button: MouseButton::Left,
        state: ButtonState::Pressed,
    });
    p.host.apply(HostEvent::Wheel { notches: 1.0 });
    p.scheduler.update().unwrap();
    p.aggregator.update();

    let mouse = p.aggregator.current().mouse.clone().unwrap();
    assert_eq!(mouse.wheel_delta(), 1);
    assert_eq!(mouse.pressed_buttons().iter().copied().collect::<Vec<_>>(), vec![MouseButton::Left]);
}

#[test]
fn test_keyboard_and_mouse_fold_together() {
    let mut p = pipeline(true);
    p.host.apply(HostEvent::Focused(true));
    p.host.apply(HostEvent::Key {
        key_code: "Space".into(),
        pressed: true,
    });

    p.scheduler.update().unwrap();
    assert_eq!(p.aggregator.update(), 2);

    let current = p.aggregator.current();
    assert!(current.mouse.is_some());
    assert!(current.keyboard.as_ref().unwrap().is_pressed("Space"));

    // The keyboard handler ranks first.
    let names: Vec<_> = p.registry.iter().map(|h| h.name().to_string()).collect();
    assert_eq!(names, vec!["keyboard", "cursor"]);
}

#[test]
fn test_no_entries_after_dispose() {
    let mut p = pipeline(true);
    p.scheduler.update().unwrap();
    p.aggregator.update();

    p.registry.dispose_all();
    for _ in 0..5 {
        p.scheduler.update().unwrap();
    }

    assert_eq!(p.aggregator.pending_len(), 0);
    assert_eq!(p.mouse_events.get().unwrap(), 1);
    assert_eq!(p.scheduler.pending_count(), 0);
}

#[test]
fn test_second_initialize_is_refused() {
    let host = Arc::new(WinitInputHost::new());
    let aggregator = InputStateAggregator::new();
    let context = InputContext {
        host,
        scheduler: Scheduler::new(),
        pending: aggregator.pending_states(),
    };

    let mut handler = CursorPollingHandler::new(Arc::new(lumen_core::telemetry::NullCounter));
    assert!(handler.initialize(&context));
    assert!(!handler.initialize(&context));
    handler.dispose();
    assert_eq!(context.scheduler.pending_count(), 0);
}
