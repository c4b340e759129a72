//=========================================================================
// Global Context
//=========================================================================
//
// The process-scoped game state every scene receives by `&mut`.
//
// Contains:
// - input_state: per-frame keys, buttons, pointer, typed text
// - scene_transitions: requested scene changes (applied at tick end)
// - message_bus: per-tick presentation messages (`AnxietyCue`)
// - scheduler: owner-tagged deadlines on the tick counter
// - media / renderer / drawing: the external collaborators
// - session: table, keepsakes and captured drawings
// - anxiety: the shared meter, mutated only through this context
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::anxiety::{AnxietyChange, AnxietyCue, AnxietyMeter};
use crate::core::drawing::{DrawingSurface, StrokeCanvas};
use crate::core::input::{InputEvent, StateTracker};
use crate::core::media::{HeadlessMedia, MediaBackend, MediaDeck};
use crate::core::message_bus::MessageBus;
use crate::core::render::{Point, RecordingRenderer, Renderer};
use crate::core::scene::{SceneKey, TransitionQueue};
use crate::core::schedule::{DeadlineId, Scheduler};
use crate::core::session::Session;
use crate::settings::GameSettings;

//=== GlobalContext =======================================================

/// Shared state and collaborators handed to scenes and overlays.
pub struct GlobalContext<S: SceneKey> {
    pub input_state: StateTracker,

    /// Scenes push target keys here; applied after all scene hooks ran.
    pub scene_transitions: TransitionQueue<S>,

    pub message_bus: MessageBus,

    pub scheduler: Scheduler<S>,

    pub media: MediaDeck<S>,

    pub renderer: Box<dyn Renderer>,

    pub drawing: Box<dyn DrawingSurface>,

    pub session: Session,

    pub settings: GameSettings,

    anxiety: AnxietyMeter,
    tick: u64,

    /// Input batches received from the platform for this tick.
    pub(crate) frame_events: Vec<Vec<InputEvent>>,
}

impl<S: SceneKey> GlobalContext<S> {
    //--- Construction -----------------------------------------------------

    pub fn new(
        settings: GameSettings,
        media: Box<dyn MediaBackend>,
        renderer: Box<dyn Renderer>,
        drawing: Box<dyn DrawingSurface>,
    ) -> Self {
        Self {
            input_state: StateTracker::new(),
            scene_transitions: TransitionQueue::new(),
            message_bus: MessageBus::new(),
            scheduler: Scheduler::new(),
            media: MediaDeck::new(media),
            renderer,
            drawing,
            session: Session::new(),
            settings,
            anxiety: AnxietyMeter::new(),
            tick: 0,
            frame_events: Vec::new(),
        }
    }

    /// Context backed by the simulated media clock, a recording renderer
    /// and a stroke-list canvas.
    pub fn headless(settings: GameSettings) -> Self {
        let media = HeadlessMedia::new(&settings.media);
        Self::new(
            settings,
            Box::new(media),
            Box::new(RecordingRenderer::new()),
            Box::new(StrokeCanvas::default()),
        )
    }

    //--- Anxiety ----------------------------------------------------------

    pub fn anxiety(&self) -> &AnxietyMeter {
        &self.anxiety
    }

    pub fn raise_anxiety(&mut self, amount: u32) -> AnxietyChange {
        let change = self.anxiety.increase(amount);
        self.publish(change)
    }

    pub fn ease_anxiety(&mut self, amount: u32) -> AnxietyChange {
        let change = self.anxiety.decrease(amount);
        self.publish(change)
    }

    /// Positive raises, negative eases.
    pub fn adjust_anxiety(&mut self, delta: i32) -> AnxietyChange {
        let change = self.anxiety.adjust(delta);
        self.publish(change)
    }

    //--- Clock ------------------------------------------------------------

    /// Ticks elapsed since start.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Milliseconds of game time covered by the ticks run so far.
    pub fn clock_ms(&self) -> u64 {
        self.settings.elapsed_ms(self.tick)
    }

    pub(crate) fn advance_tick(&mut self) {
        self.tick += 1;
    }

    /// Schedules a deadline `ms` from now for `owner`.
    pub fn schedule_after(&mut self, owner: S, ms: u64) -> DeadlineId {
        let due = self.tick + self.settings.ticks_for(ms);
        self.scheduler.schedule(owner, due)
    }

    //--- Convenience ------------------------------------------------------

    /// Canvas size in pixels.
    pub fn canvas(&self) -> (f32, f32) {
        self.settings.canvas()
    }

    /// Primary-button click position this tick.
    pub fn clicked(&self) -> Option<Point> {
        self.input_state.click()
    }

    pub fn pointer(&self) -> Point {
        self.input_state.pointer()
    }

    /// Puts the game back to its first-launch state.
    pub fn reset_session(&mut self) {
        info!("Resetting game session");
        self.anxiety.reset();
        self.session.reset();
        self.media.stop_all();
        self.drawing.clear();
        self.scheduler.clear();
    }

    //--- Internal Helpers -------------------------------------------------

    fn publish(&mut self, change: AnxietyChange) -> AnxietyChange {
        if let Some(cue) = AnxietyCue::for_change(&change) {
            info!("Anxiety {} -> {}", change.previous, change.level);
            self.message_bus.push(cue);
        }
        change
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
