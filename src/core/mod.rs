//=========================================================================
// Core Systems Orchestrator
//
// Owns every piece of mutable game state on a single logic thread.
//
// Responsibilities:
// - Hold the GlobalSystems (scene machine, overlay) and GlobalContext
// - Drain platform events from the crossbeam channel each tick
// - Run GlobalSystems::update at a fixed tick rate (TPS)
//
// Notes:
// The platform thread never touches game state; it only sends
// `PlatformEvent`s. All mutation is serialized through this thread.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod anxiety;
pub mod drawing;
pub mod error;
pub mod globals;
pub mod input;
pub mod media;
pub mod message_bus;
pub(crate) mod platform_bridge;
pub mod render;
pub mod scene;
pub mod schedule;
pub mod session;

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use globals::{GlobalContext, GlobalSystems};
use platform_bridge::{EventCollector, PlatformEvent, TickControl};
use scene::SceneKey;

//=== CoreSystemsOrchestrator =============================================

pub(crate) struct CoreSystemsOrchestrator<S: SceneKey> {
    systems: GlobalSystems<S>,
    context: GlobalContext<S>,
}

impl<S: SceneKey> CoreSystemsOrchestrator<S> {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(context: GlobalContext<S>) -> Self {
        Self {
            systems: GlobalSystems::new(),
            context,
        }
    }

    /// Lets the game register scenes and the overlay before the thread starts.
    pub(crate) fn init_systems<F>(&mut self, init_fn: F)
    where
        F: FnOnce(&mut GlobalSystems<S>),
    {
        init_fn(&mut self.systems);
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Each tick:
    //  1. Drains platform events (exit on close/disconnect)
    //  2. Runs one GlobalSystems update
    //  3. Sleeps out the rest of the tick
    //
    pub(crate) fn spawn_core_thread(
        self,
        receiver: Receiver<PlatformEvent>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut systems = self.systems;
            let mut context = self.context;
            let mut collector = EventCollector::new(receiver);

            systems.start(&mut context);

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                if collector.collect_frame() == TickControl::Exit {
                    info!("Core thread exiting.");
                    break;
                }
                context.frame_events.extend(collector.take_batches());

                //--- Step 2: Tick the game ---------------------------------
                systems.update(&mut context);

                //--- Step 3: Maintain fixed pacing -----------------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                } else {
                    debug!("Tick {} overran by {:?}", context.tick(), elapsed - frame_duration);
                }
            }
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::Scene;
    use crate::settings::GameSettings;
    use crossbeam_channel::unbounded;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestScene {
        Main,
    }

    impl SceneKey for TestScene {}

    struct Counter(Arc<AtomicU64>);

    impl Scene<TestScene> for Counter {
        fn update(&mut self, _context: &mut GlobalContext<TestScene>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn core_thread_ticks_until_window_closes() {
        let ticks = Arc::new(AtomicU64::new(0));
        let mut orchestrator =
            CoreSystemsOrchestrator::new(GlobalContext::headless(GameSettings::default()));
        let counter = Counter(ticks.clone());
        orchestrator.init_systems(|systems| {
            systems.scene_manager.register_default(TestScene::Main, counter);
        });

        let (tx, rx) = unbounded();
        let handle = orchestrator.spawn_core_thread(rx, 1000.0);

        while ticks.load(Ordering::SeqCst) < 3 {
            thread::sleep(Duration::from_millis(1));
        }
        tx.send(PlatformEvent::WindowClosed).unwrap();

        assert!(handle.join().is_ok(), "Core thread should exit cleanly");
    }
}
