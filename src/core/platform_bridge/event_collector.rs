//=========================================================================
// Event Collector
//=========================================================================
//
// Platform event collector with bounded polling and shutdown detection.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → input_batches → TickControl
//
// Bounded polling keeps one tick from draining an unbounded backlog.
// Pacing is left to the orchestrator's fixed-rate loop.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::event::InputEvent;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Collects platform events with bounded polling and batch extraction.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    input_batches: Vec<Vec<InputEvent>>,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            input_batches: Vec::with_capacity(4),
        }
    }

    /// Collects pending platform events (bounded to prevent starvation).
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        const MAX_EVENTS_PER_FRAME: usize = 100;

        self.input_batches.clear();
        let mut drained = 0;

        while drained < MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_EVENTS_PER_FRAME {
            warn!(target: "platform", "Event queue backlog: drained {} events this tick", drained);
        }

        TickControl::Continue
    }

    #[cfg(test)]
    pub(crate) fn batches(&self) -> &[Vec<InputEvent>] {
        &self.input_batches
    }

    /// Moves this tick's batches out, leaving an empty buffer.
    pub(crate) fn take_batches(&mut self) -> Vec<Vec<InputEvent>> {
        std::mem::take(&mut self.input_batches)
    }

    fn handle_event(&mut self, event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::Inputs { discrete, continuous } => {
                if !discrete.is_empty() {
                    self.input_batches.push(discrete);
                }
                if !continuous.is_empty() {
                    self.input_batches.push(continuous);
                }
                TickControl::Continue
            }
            PlatformEvent::WindowClosed => TickControl::Exit,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{Modifiers, MouseButton};
    use crossbeam_channel::unbounded;

    fn typed(text: &str) -> PlatformEvent {
        PlatformEvent::Inputs {
            discrete: text.chars().map(InputEvent::Text).collect(),
            continuous: Vec::new(),
        }
    }

    #[test]
    fn idle_queue_returns_immediately() {
        let (_tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert!(collector.batches().is_empty());
    }

    #[test]
    fn discrete_and_continuous_become_separate_batches() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Inputs {
            discrete: vec![InputEvent::MouseButtonDown {
                button: MouseButton::Left,
                modifiers: Modifiers::NONE,
            }],
            continuous: vec![InputEvent::MouseMoved { x: 640.0, y: 360.0 }],
        })
        .unwrap();
        tx.send(typed("hi")).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        let batches = collector.take_batches();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[2], vec![InputEvent::Text('h'), InputEvent::Text('i')]);
        assert!(collector.batches().is_empty(), "take_batches leaves nothing behind");
    }

    #[test]
    fn empty_inputs_are_skipped() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(typed("")).unwrap();
        collector.collect_frame();
        assert!(collector.batches().is_empty());
    }

    #[test]
    fn backlog_is_spread_over_ticks() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        for _ in 0..150 {
            tx.send(typed("a")).unwrap();
        }

        collector.collect_frame();
        assert_eq!(collector.batches().len(), 100);
        collector.collect_frame();
        assert_eq!(collector.batches().len(), 50);
    }

    #[test]
    fn window_close_and_disconnect_exit() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);
        tx.send(PlatformEvent::WindowClosed).unwrap();
        assert_eq!(collector.collect_frame(), TickControl::Exit);

        let (tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);
        drop(tx);
        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }
}
