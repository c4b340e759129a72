//=========================================================================
// Global Systems
//=========================================================================
//
// Per-tick orchestration: turns platform input, the clock, deadlines and
// media completions into scene calls, enforces the game-over rule, and
// drives rendering.
//
// Tick order:
//   1. input batches → StateTracker
//   2. tick counter + media clock
//   3. overlay input (may suspend, resume or abandon the scene)
//   4. due deadlines → owning scene
//   5. finished media → owning scene
//   6. scene update (unless the overlay consumed input)
//   7. forced game over when the meter is maxed
//   8. queued transitions
//   9. render: overlay pre-pass, scene, overlay
//  10. message bus cleared
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::{GlobalContext, Overlay, OverlayFrame, OverlayResponse};
use crate::core::scene::{SceneKey, SceneManager};

//=== GlobalSystems =======================================================

/// Engine-level logic operating on a [`GlobalContext`].
pub struct GlobalSystems<S: SceneKey> {
    pub scene_manager: SceneManager<S>,
    overlay: Option<Box<dyn Overlay<S>>>,
    game_over: Option<S>,
}

impl<S: SceneKey> GlobalSystems<S> {
    pub(crate) fn new() -> Self {
        Self {
            scene_manager: SceneManager::new(),
            overlay: None,
            game_over: None,
        }
    }

    //--- Configuration ----------------------------------------------------

    pub fn set_overlay<O>(&mut self, overlay: O)
    where
        O: Overlay<S> + 'static,
    {
        if self.overlay.replace(Box::new(overlay)).is_some() {
            warn!("Overlay replaced");
        }
    }

    /// Scene forced whenever the anxiety meter is at its maximum.
    pub fn set_game_over_scene(&mut self, key: S) {
        self.game_over = Some(key);
    }

    pub(crate) fn start(&mut self, context: &mut GlobalContext<S>) {
        self.scene_manager.start(context);
    }

    //--- Update Loop ------------------------------------------------------

    pub(crate) fn update(&mut self, context: &mut GlobalContext<S>) {
        // 1. Input
        context.input_state.clear();
        for batch in context.frame_events.drain(..) {
            context.input_state.process_events(&batch);
        }
        context.input_state.finalize_frame();

        // 2. Clock
        let before = context.clock_ms();
        context.advance_tick();
        context.media.poll(context.clock_ms() - before);

        // 3. Overlay input
        let frame = self.frame();
        let response = match self.overlay.as_mut() {
            Some(overlay) => overlay.handle_input(frame, context),
            None => OverlayResponse::Pass,
        };
        match response {
            OverlayResponse::Suspend => self.scene_manager.suspend(context),
            OverlayResponse::Resume => self.scene_manager.resume(context),
            OverlayResponse::Abandon => self.scene_manager.abandon(context),
            OverlayResponse::Pass | OverlayResponse::Consumed => {}
        }

        // 4-5. Scheduled and media events
        self.scene_manager.dispatch_deadlines(context);
        self.scene_manager.dispatch_media(context);

        // 6. Scene logic
        if response == OverlayResponse::Pass {
            self.scene_manager.update(context);
        }

        // 7-8. Transitions
        self.enforce_game_over(context);
        self.scene_manager.process_transitions(context);

        // 9. Presentation
        self.render(context);

        // 10. Tick boundary
        context.message_bus.clear_all();
    }

    //--- Internal Helpers -------------------------------------------------

    fn frame(&self) -> OverlayFrame<S> {
        OverlayFrame {
            scene: self.scene_manager.current(),
            suspended: self.scene_manager.is_suspended(),
        }
    }

    fn enforce_game_over(&mut self, context: &mut GlobalContext<S>) {
        let Some(game_over) = self.game_over else { return };
        if !context.anxiety().is_maxed() || self.scene_manager.current() == Some(game_over) {
            return;
        }

        let only_game_over = context.scene_transitions.iter().all(|&key| key == game_over);
        if only_game_over && !context.scene_transitions.is_empty() {
            return;
        }

        info!("Anxiety maxed out, forcing {:?}", game_over);
        context.scene_transitions.clear();
        context.scene_transitions.push(game_over);
    }

    fn render(&mut self, context: &mut GlobalContext<S>) {
        let frame = self.frame();
        context.renderer.begin_frame();

        if let Some(overlay) = self.overlay.as_mut() {
            overlay.before_render(frame, context);
        }
        self.scene_manager.render(context);
        if let Some(overlay) = self.overlay.as_ref() {
            overlay.render(frame, context);
        }

        context.renderer.end_frame();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
