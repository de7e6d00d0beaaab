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

//! The public-facing SDK of the Lumen platform layer.
//!
//! Implement [`Application`] and hand it to [`Engine::run`]: the engine opens the
//! window, polls input on a background thread and calls
//! [`Application::update`] once per frame with the folded input state.

mod frame;
mod input_thread;

pub use frame::{FrameContext, HostWindow};
pub use input_thread::InputThread;

use anyhow::Result;
use lumen_core::config::HostConfig;
use lumen_core::input::{HandlerRegistry, InputContext, InputStateAggregator};
use lumen_core::platform::{CloseOutcome, GraphicsContext, GraphicsInfo, WindowController};
use lumen_core::scheduler::Scheduler;
use lumen_core::telemetry::{ids, CounterSink};
use lumen_infra::platform::input::HostEvent;
use lumen_infra::{CursorPollingHandler, KeyboardPollingHandler, WinitInputHost, WinitWindowBuilder};
use lumen_telemetry::{CounterHandle, GaugeHandle, TelemetryService};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

/// Commonly used types for applications.
pub mod prelude {
    pub use crate::{AppContext, Application, Engine, FrameContext};
    pub use lumen_core::config::{FrameConfig, HostConfig, InputConfig, WindowConfig};
    pub use lumen_core::input::{InputState, KeyboardState, MouseButton, MouseState};
    pub use lumen_core::math::Vec2;
    pub use lumen_core::platform::{CursorState, GraphicsInfo, Version};
}

/// What an application receives when it is created.
pub struct AppContext<'a> {
    /// The graphics context details gathered at startup.
    pub graphics: &'a GraphicsInfo,
    /// The configuration the engine was started with.
    pub config: &'a HostConfig,
}

/// A program driven by the [`Engine`].
pub trait Application: Sized + 'static {
    /// Called once, after the window and input thread are up.
    fn new(context: AppContext<'_>) -> Self;

    /// Called once per frame, after pending input has been folded.
    fn update(&mut self, frame: &mut FrameContext<'_>);

    /// Called when the user asks to close the window. Returning `true` keeps it open.
    fn exit_requested(&mut self) -> bool {
        false
    }
}

/// Startup results, kept together so a failure leaves nothing half-built.
struct Running<A: Application> {
    app: A,
    window: HostWindow,
    scheduler: Scheduler,
    input_thread: InputThread,
    states_folded: CounterHandle,
    pending_states: GaugeHandle,
}

/// The internal state of the running engine, managed by the winit event loop.
struct EngineState<A: Application> {
    config: HostConfig,
    running: Option<Running<A>>,
    host: Arc<WinitInputHost>,
    aggregator: InputStateAggregator,
    handlers: HandlerRegistry,
    telemetry: TelemetryService,
    /// Read and reset by the window's exit-requested subscriber.
    app_veto: Arc<AtomicBool>,
    exit_after_frame: bool,
    clear_color: [f32; 3],
    frame_number: u64,
    last_frame: Instant,
    next_frame: Instant,
    error: Option<anyhow::Error>,
}

impl<A: Application> EngineState<A> {
    fn new(config: HostConfig) -> Self {
        Self {
            config,
            running: None,
            host: Arc::new(WinitInputHost::new()),
            aggregator: InputStateAggregator::new(),
            handlers: HandlerRegistry::new(),
            telemetry: TelemetryService::default(),
            app_veto: Arc::new(AtomicBool::new(false)),
            exit_after_frame: false,
            clear_color: [0.1, 0.1, 0.12],
            frame_number: 0,
            last_frame: Instant::now(),
            next_frame: Instant::now(),
            error: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<Running<A>> {
        let (native, mut context) =
            WinitWindowBuilder::new(self.config.window.clone()).build(event_loop)?;
        // The builder leaves the context current; the controller claims it itself.
        context.make_not_current()?;

        let mut window = WindowController::new(native, context)?;
        window.setup_window(&self.config.window);
        self.host
            .apply(HostEvent::ClientOrigin(window.window().client_origin()));
        self.host.apply(HostEvent::Focused(window.is_active()));

        let veto = self.app_veto.clone();
        window.on_exit_requested(move || veto.swap(false, Ordering::SeqCst));
        window.on_exited(|| log::info!("Window exited."));

        // The event-loop thread renders, so it keeps the context for good.
        window.acquire_context()?;

        let registry = self.telemetry.metrics_registry();
        let mouse_events = registry.register_counter(ids::mouse_events(), "Pointer polling ticks")?;
        let keyboard_events =
            registry.register_counter(ids::keyboard_events(), "Keyboard polling ticks")?;
        let states_folded =
            registry.register_counter(ids::states_folded(), "Input states folded by frames")?;
        let pending_states =
            registry.register_gauge(ids::pending_states(), "Input states queued at frame start", "states")?;

        self.handlers
            .register(Box::new(CursorPollingHandler::new(Arc::new(mouse_events))));
        if self.config.input.enable_keyboard {
            self.handlers
                .register(Box::new(KeyboardPollingHandler::new(Arc::new(keyboard_events))));
        }

        let scheduler = Scheduler::new();
        let report = self.handlers.initialize_all(&InputContext {
            host: self.host.clone(),
            scheduler: scheduler.clone(),
            pending: self.aggregator.pending_states(),
        });
        if !report.all_initialized() {
            log::warn!("Running without input handler(s): {:?}", report.failed);
        }
        log::info!("Input handlers ready: {:?}", report.initialized);

        let input_thread = InputThread::start(scheduler.clone(), self.config.input.poll_interval())?;

        let app = A::new(AppContext {
            graphics: window.graphics_info(),
            config: &self.config,
        });

        Ok(Running {
            app,
            window,
            scheduler,
            input_thread,
            states_folded,
            pending_states,
        })
    }

    fn run_frame(&mut self) {
        let Some(running) = self.running.as_mut() else {
            return;
        };

        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;

        if let Err(e) = running.pending_states.set(self.aggregator.pending_len() as f64) {
            log::warn!("Failed to record the input queue length: {e}");
        }
        let folded = self.aggregator.update();
        if folded > 0 {
            running.states_folded.add(folded as u64);
        }

        let mut frame = FrameContext {
            input: self.aggregator.current(),
            window: &mut running.window,
            frame_number: self.frame_number,
            delta,
            exit: &mut self.exit_after_frame,
            clear_color: &mut self.clear_color,
        };
        running.app.update(&mut frame);
        self.frame_number += 1;

        match running.window.context_mut() {
            Ok(context) => {
                let [red, green, blue] = self.clear_color;
                context.clear(red, green, blue);
                if let Err(e) = context.swap_buffers() {
                    log::error!("Failed to present the frame: {e}");
                }
            }
            Err(e) => log::error!("Cannot render: {e}"),
        }

        if self.telemetry.tick() {
            log::debug!(
                "Frame {}: {} input tasks queued.",
                self.frame_number,
                running.scheduler.pending_count()
            );
            for snapshot in self.telemetry.namespace_snapshot("input") {
                log::info!("{} = {} {}", snapshot.id, snapshot.value, snapshot.unit);
            }
        }
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        let Some(running) = self.running.as_mut() else {
            event_loop.exit();
            return;
        };
        match running.window.request_close() {
            CloseOutcome::Cancelled => {}
            CloseOutcome::Closed | CloseOutcome::AlreadyClosed => event_loop.exit(),
        }
    }
}

impl<A: Application> Drop for EngineState<A> {
    fn drop(&mut self) {
        log::info!("Shutting down...");
        self.handlers.dispose_all();
        if let Some(mut running) = self.running.take() {
            running.input_thread.stop();
            running.scheduler.clear();
            if let Err(e) = running.window.release_context() {
                log::warn!("Failed to release the graphics context: {e}");
            }
        }
        if let Ok(summary) = self.telemetry.snapshot_json() {
            log::info!("Final metrics: {summary}");
        }
        log::info!("Shutdown complete.");
    }
}

impl<A: Application> ApplicationHandler for EngineState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }

        log::info!("Application resumed. Initializing window and input...");
        match self.start(event_loop) {
            Ok(running) => {
                self.running = Some(running);
                self.last_frame = Instant::now();
                self.next_frame = self.last_frame;
            }
            Err(e) => {
                log::error!("Startup failed: {e:#}");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let Some(running) = self.running.as_mut() else {
            return;
        };
        let native = running.window.window();
        if native.id() != id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                let veto = running.app.exit_requested();
                self.app_veto.store(veto, Ordering::SeqCst);
                self.close(event_loop);
            }
            WindowEvent::Resized(size) => {
                self.host.apply(HostEvent::ClientOrigin(native.client_origin()));
                if let Ok(context) = running.window.context_mut() {
                    context.resize(size.width, size.height);
                }
            }
            WindowEvent::Moved(_) => {
                self.host.apply(HostEvent::ClientOrigin(native.client_origin()));
            }
            WindowEvent::Focused(focused) => {
                self.host.apply(HostEvent::Focused(focused));
                running.window.focus_changed(focused);
            }
            WindowEvent::RedrawRequested => {}
            other => {
                self.host.handle_window_event(&other);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_none() {
            return;
        }

        let now = Instant::now();
        if now >= self.next_frame {
            self.run_frame();
            self.next_frame = match self.config.frame.frame_interval() {
                Some(interval) => (self.next_frame + interval).max(now),
                None => now,
            };
        }

        if std::mem::take(&mut self.exit_after_frame) {
            self.close(event_loop);
            return;
        }

        match self.config.frame.frame_interval() {
            Some(_) => event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame)),
            None => event_loop.set_control_flow(ControlFlow::Poll),
        }
    }
}

/// The public entry point of the Lumen platform layer.
pub struct Engine;

impl Engine {
    /// Opens the window described by `config` and runs `A` until the window closes.
    ///
    /// Blocks the calling thread, which must be the process's main thread on most
    /// platforms.
    pub fn run<A: Application>(config: HostConfig) -> Result<()> {
        log::info!("Lumen SDK: Starting...");
        let event_loop = EventLoop::new()?;

        let mut state = EngineState::<A>::new(config);
        event_loop.run_app(&mut state)?;

        match state.error.take() {
            Some(e) => Err(e.context("The engine failed to start")),
            None => Ok(()),
        }
    }

    /// Runs `A` with the default configuration.
    pub fn run_default<A: Application>() -> Result<()> {
        Self::run::<A>(HostConfig::default())
    }
}
