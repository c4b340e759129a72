//=========================================================================
// Engine
//
// Main entry point and coordinator.
//
// Architecture:
// ```text
//     EngineBuilder  ──build(context)──>  Engine  ──run()──>  [Runtime]
//         │                                 │
//         ├─ from_settings()                ├─ init(): register scenes
//         ├─ with_tps()                     └─ run(): spawns the core
//         └─ with_channel_capacity()           thread, runs the window
//                                              on this one, blocks
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::globals::{GlobalContext, GlobalSystems};
use crate::core::platform_bridge::PlatformEvent;
use crate::core::scene::SceneKey;
use crate::core::CoreSystemsOrchestrator;
use crate::platform::Platform;
use crate::settings::{GameSettings, WindowSettings};

//=== EngineBuilder =======================================================

/// Builder for an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 1024 events
/// - **Window**: "Anxiety Cafe", 1280x720
///
/// # Examples
///
/// ```no_run
/// use anxiety_cafe::{EngineBuilder, GameSettings};
/// use anxiety_cafe::core::globals::GlobalContext;
/// use anxiety_cafe::game::{self, GameScene};
///
/// let settings = GameSettings::default();
/// EngineBuilder::<GameScene>::from_settings(&settings)
///     .with_tps(120.0)
///     .build(GlobalContext::headless(settings))
///     .init(game::install)
///     .run();
/// ```
pub struct EngineBuilder<S: SceneKey> {
    tps: f64,
    channel_capacity: usize,
    window: WindowSettings,
    _phantom: std::marker::PhantomData<S>,
}

impl<S: SceneKey> EngineBuilder<S> {
    pub fn new() -> Self {
        Self::from_settings(&GameSettings::default())
    }

    /// Takes TPS, channel capacity and window settings from `settings`.
    pub fn from_settings(settings: &GameSettings) -> Self {
        Self {
            tps: settings.tps,
            channel_capacity: settings.channel_capacity,
            window: settings.window.clone(),
            _phantom: std::marker::PhantomData,
        }
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the capacity of the platform → core channel.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Builds the engine around `context`, which the core thread will own.
    pub fn build(self, context: GlobalContext<S>) -> Engine<S> {
        info!("Building engine (TPS: {}, channel: {})", self.tps, self.channel_capacity);

        Engine {
            orchestrator: CoreSystemsOrchestrator::new(context),
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            window: self.window,
        }
    }
}

impl<S: SceneKey> Default for EngineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Runtime: the window on the calling thread, all game state on one core
/// thread, connected by a bounded crossbeam channel of `PlatformEvent`s.
pub struct Engine<S: SceneKey> {
    orchestrator: CoreSystemsOrchestrator<S>,
    tps: f64,
    channel_capacity: usize,
    window: WindowSettings,
}

impl<S: SceneKey> Engine<S> {
    //--- Initialization ---------------------------------------------------

    /// Gives access to [`GlobalSystems`] to register scenes, the overlay
    /// and the game-over scene before the core thread starts.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut GlobalSystems<S>),
    {
        info!("Initializing engine systems");
        self.orchestrator.init_systems(init_fn);
        self
    }

    //--- Execution --------------------------------------------------------

    /// Starts the runtime and blocks until the window closes.
    ///
    /// 1. Creates the platform → core channel
    /// 2. Spawns the core thread at the configured TPS
    /// 3. Runs the window event loop (blocks here)
    /// 4. Joins the core thread
    pub fn run(self) {
        info!("Starting engine runtime (TPS: {})", self.tps);

        //--- 1. Create communication channel -----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);

        //--- 2. Spawn the core logic thread -------------------------------
        let core_handle = self.orchestrator.spawn_core_thread(rx, self.tps);
        info!("Core logic thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(tx, self.window);
        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
        }
        info!("Platform event loop exited");

        //--- 4. Wait for the core thread ------------------------------------
        match core_handle.join() {
            Ok(()) => info!("Core thread terminated cleanly"),
            Err(e) => error!("Core thread panicked: {:?}", e),
        }

        info!("Engine shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
