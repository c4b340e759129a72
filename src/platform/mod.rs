//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the engine's core thread.
//
// Architecture:
// ```text
//  Main Thread:                     Core Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  EventCollector  │
//  │   ↓                      │    │  ↓               │
//  │  InputProcessor          │    │  StateTracker    │
//  │   ├─ Converts Winit      │    │  ↓               │
//  │   ├─ Tracks modifiers    │    │  Overlay, Scenes │
//  │   └─ Tracks the cursor   │    │                  │
//  │   ↓                      │    └──────────────────┘
//  │  InputBuffer             │             ↑
//  │   ├─ discrete: Vec<>     │             │
//  │   └─ continuous: latest  │             │
//  │   ↓                      │             │
//  │  RedrawRequested (flush) │             │
//  │   ↓                      │             │
//  │  crossbeam channel ──────┼─────────────┘
//  └──────────────────────────┘    PlatformEvent
// ```
//
// Frame boundary is RedrawRequested: everything buffered since the last
// redraw is sent as one `PlatformEvent::Inputs`. Empty buffers are not
// sent. The core thread ticks at its own fixed rate.
//
// Winit requires the main thread on macOS/iOS, so this runs on the thread
// that called `Engine::run()`.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use crate::settings::WindowSettings;
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Platform ============================================================

/// Window host and input aggregator.
///
/// Not `Send`; stays on the main thread and talks to the core thread
/// only through `event_sender`.
pub(crate) struct Platform {
    /// Created lazily in `resumed()`.
    window: Option<Window>,
    settings: WindowSettings,
    buffer: InputBuffer,
    event_sender: Sender<PlatformEvent>,
    input_processor: InputProcessor,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(event_sender: Sender<PlatformEvent>, settings: WindowSettings) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            settings,
            buffer: InputBuffer::new(),
            event_sender,
            input_processor: InputProcessor::new(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the Winit event loop until the window closes.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends everything buffered since the last redraw.
    ///
    /// A disconnected channel (core thread gone) drops the events with a
    /// warning so the window can still be closed normally.
    fn flush_input_buffer(&mut self) {
        let Some((discrete, continuous)) = self.buffer.drain() else { return };
        let total = discrete.len() + continuous.len();

        trace!(
            target: "platform",
            "Flushing {} discrete + {} continuous events",
            discrete.len(),
            continuous.len()
        );

        if self.event_sender.send(PlatformEvent::Inputs { discrete, continuous }).is_err() {
            warn!(target: "platform", "Channel disconnected, dropping {} events", total);
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if self.event_sender.send(PlatformEvent::WindowClosed).is_err() {
            debug!(target: "platform", "Core thread already gone at shutdown");
        }
        event_loop.exit();
    }

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (resume)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(self.settings.width, self.settings.height))
            .with_resizable(false);

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "{}", PlatformError::WindowCreation(e.to_string()));
                self.shutdown(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.shutdown(event_loop);
            }

            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "platform", "Modifiers changed: {:?}", state);
                self.input_processor.update_modifiers(state.state());
            }

            WindowEvent::CursorMoved { position, .. } => {
                // Logical pixels match the canvas coordinates scenes use.
                let scale = self.window.as_ref().map_or(1.0, |w| w.scale_factor());
                let logical = position.to_logical::<f64>(scale);
                let event = self.input_processor.process_mouse_move(logical.x as f32, logical.y as f32);
                self.buffer.push_continuous(event);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                for event in self.input_processor.process_key_event(key_event) {
                    self.buffer.push_discrete(event);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                for event in self.input_processor.process_mouse_button(*button, *state) {
                    self.buffer.push_discrete(event);
                }
            }

            WindowEvent::RedrawRequested => {
                self.flush_input_buffer();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::event::InputEvent;
    use crate::core::input::{KeyCode, Modifiers};
    use crossbeam_channel::unbounded;

    fn platform() -> (Platform, crossbeam_channel::Receiver<PlatformEvent>) {
        let (tx, rx) = unbounded();
        (Platform::new(tx, WindowSettings::default()), rx)
    }

    #[test]
    fn window_is_created_lazily() {
        let (platform, _rx) = platform();
        assert!(platform.window().is_none());
    }

    #[test]
    fn flush_of_empty_buffer_sends_nothing() {
        let (mut platform, rx) = platform();
        platform.flush_input_buffer();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn flush_sends_buffered_events_once() {
        let (mut platform, rx) = platform();
        platform.buffer.push_discrete(InputEvent::KeyDown { key: KeyCode::Enter, modifiers: Modifiers::NONE });
        platform.buffer.push_discrete(InputEvent::Text('m'));

        platform.flush_input_buffer();
        platform.flush_input_buffer();

        match rx.try_recv() {
            Ok(PlatformEvent::Inputs { discrete, continuous }) => {
                assert_eq!(discrete.len(), 2);
                assert!(continuous.is_empty());
            }
            other => panic!("Expected Inputs, got {:?}", other),
        }
        assert!(rx.try_recv().is_err(), "Second flush has nothing to send");
    }

    #[test]
    fn flush_survives_disconnected_core() {
        let (mut platform, rx) = platform();
        platform.buffer.push_discrete(InputEvent::Text('x'));
        drop(rx);
        platform.flush_input_buffer();
        assert!(platform.buffer.is_empty());
    }
}
