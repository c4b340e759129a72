//=========================================================================
// Scene Manager
//=========================================================================
//
// Owns scene identity: registration, the current scene, transitions and
// per-scene event delivery.
//
// Scenes are stored in a HashMap by key so they keep their state between
// visits; the manager only tracks which key is current.
//
// Transition contract:
//   same scene        → no-op, no hooks fire
//   otherwise         → old.on_exit → cancel old deadlines + media
//                       → current := next → next.on_enter
//   unregistered next → current := next, ConfigurationError returned,
//                       render shows a "no handler" placeholder
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use super::{Scene, SceneKey};
use crate::core::error::ConfigurationError;
use crate::core::globals::GlobalContext;
use crate::core::render::{Color, Point, TextStyle};

//=== Scene Manager =======================================================

pub struct SceneManager<S: SceneKey> {
    scenes: HashMap<S, Box<dyn Scene<S>>>,
    initial: Option<S>,
    current: Option<S>,
    suspended: bool,
}

impl<S: SceneKey> SceneManager<S> {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            scenes: HashMap::new(),
            initial: None,
            current: None,
            suspended: false,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers the handler for `key`, replacing any previous one.
    pub fn register_scene<T>(&mut self, key: S, scene: T)
    where
        T: Scene<S> + 'static,
    {
        if self.scenes.insert(key, Box::new(scene)).is_some() {
            warn!("Scene {:?} was already registered and has been replaced", key);
        }
    }

    /// Registers a scene and makes it the one entered by [`start`](Self::start).
    pub fn register_default<T>(&mut self, key: S, scene: T)
    where
        T: Scene<S> + 'static,
    {
        self.register_scene(key, scene);
        if let Some(previous) = self.initial.replace(key) {
            warn!("Default scene {:?} replaced by {:?}", previous, key);
        }
        debug!("Registered scene {:?} as default", key);
    }

    /// Enters the default scene.
    pub fn start(&mut self, context: &mut GlobalContext<S>) {
        let Some(initial) = self.initial else {
            warn!("Scene manager started without a default scene");
            return;
        };

        debug!("Starting scene manager with initial scene: {:?}", initial);
        self.current = Some(initial);
        match self.scenes.get_mut(&initial) {
            Some(scene) => scene.on_enter(context),
            None => error!("{}", ConfigurationError::UnregisteredScene(initial)),
        }
    }

    //--- Query API --------------------------------------------------------

    pub fn current(&self) -> Option<S> {
        self.current
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn is_registered(&self, key: S) -> bool {
        self.scenes.contains_key(&key)
    }

    //--- Transitions ------------------------------------------------------

    /// Makes `next` the current scene.
    pub fn transition(
        &mut self,
        next: S,
        context: &mut GlobalContext<S>,
    ) -> Result<(), ConfigurationError<S>> {
        if self.current == Some(next) {
            debug!("Already in {:?}, transition ignored", next);
            return Ok(());
        }

        if let Some(previous) = self.current {
            if let Some(scene) = self.scenes.get_mut(&previous) {
                scene.on_exit(context);
            }
            let cancelled = context.scheduler.cancel_owner(previous);
            if cancelled > 0 {
                debug!("Cancelled {} deadlines of {:?}", cancelled, previous);
            }
            context.media.release_owner(previous);
        }

        info!("Scene transition: {:?} -> {:?}", self.current, next);
        self.current = Some(next);
        self.suspended = false;

        match self.scenes.get_mut(&next) {
            Some(scene) => {
                scene.on_enter(context);
                Ok(())
            }
            None => Err(ConfigurationError::UnregisteredScene(next)),
        }
    }

    /// Applies the transitions queued during this tick, in order.
    ///
    /// Requests queued by the `on_enter` hooks run here wait for the
    /// next call.
    pub fn process_transitions(&mut self, context: &mut GlobalContext<S>) {
        for next in context.scene_transitions.take() {
            if let Err(e) = self.transition(next, context) {
                error!("{}", e);
            }
        }
    }

    //--- Suspension -------------------------------------------------------

    /// Freezes the current scene: its deadlines are cancelled and it gets
    /// no updates, deadlines or media completions until resumed.
    pub fn suspend(&mut self, context: &mut GlobalContext<S>) {
        let Some(current) = self.current else { return };
        if self.suspended {
            return;
        }

        self.suspended = true;
        let cancelled = context.scheduler.cancel_owner(current);
        debug!("Suspended {:?} ({} deadlines cancelled)", current, cancelled);
    }

    pub fn resume(&mut self, context: &mut GlobalContext<S>) {
        if !self.suspended {
            return;
        }

        self.suspended = false;
        if let Some(current) = self.current {
            debug!("Resuming {:?}", current);
            if let Some(scene) = self.scenes.get_mut(&current) {
                scene.on_resume(context);
            }
        }
    }

    /// Drops everything the suspended scene still has pending, so nothing
    /// it queued can race the transition that replaces it. The scene stays
    /// suspended until that transition runs.
    pub fn abandon(&mut self, context: &mut GlobalContext<S>) {
        let Some(current) = self.current else { return };
        if !self.suspended {
            return;
        }

        context.scheduler.cancel_owner(current);
        context.media.release_owner(current);
        debug!("Abandoned {:?}", current);
    }

    //--- Event Delivery ---------------------------------------------------

    /// Hands due deadlines to the current scene.
    pub fn dispatch_deadlines(&mut self, context: &mut GlobalContext<S>) {
        if self.suspended {
            return;
        }

        let now = context.tick();
        for deadline in context.scheduler.take_due(now) {
            match self.current_scene(deadline.owner) {
                Some(scene) => scene.on_deadline(deadline.id, context),
                None => debug!("Dropping stale deadline {:?} of {:?}", deadline.id, deadline.owner),
            }
        }
    }

    /// Hands finished cues to the current scene. While suspended they stay
    /// queued in the media deck.
    pub fn dispatch_media(&mut self, context: &mut GlobalContext<S>) {
        if self.suspended {
            return;
        }

        for completed in context.media.take_completed() {
            match self.current_scene(completed.owner) {
                Some(scene) => scene.on_media_complete(completed.cue, context),
                None => debug!(
                    target: "media",
                    "Dropping stale completion of {:?} for {:?}",
                    completed.cue,
                    completed.owner
                ),
            }
        }
    }

    pub fn update(&mut self, context: &mut GlobalContext<S>) {
        if self.suspended {
            return;
        }
        if let Some(key) = self.current {
            if let Some(scene) = self.scenes.get_mut(&key) {
                scene.update(context);
            }
        }
    }

    //--- Rendering --------------------------------------------------------

    pub fn render(&self, context: &mut GlobalContext<S>) {
        let Some(key) = self.current else { return };

        match self.scenes.get(&key) {
            Some(scene) => scene.render(context),
            None => {
                let (w, h) = context.canvas();
                context.renderer.clear(Color::BLACK);
                context.renderer.draw_text(
                    &format!("Error: No handler for game state \"{:?}\"", key),
                    Point::new(w / 2.0, h / 2.0),
                    TextStyle::new(24.0, Color::WHITE).centered(),
                );
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn current_scene(&mut self, owner: S) -> Option<&mut Box<dyn Scene<S>>> {
        if self.current == Some(owner) {
            self.scenes.get_mut(&owner)
        } else {
            None
        }
    }
}

impl<S: SceneKey> Default for SceneManager<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::media::Cue;
    use crate::core::render::RecordingRenderer;
    use crate::core::schedule::DeadlineId;
    use crate::settings::GameSettings;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum TestScene {
        A,
        B,
        Unregistered,
    }

    impl SceneKey for TestScene {}

    //--- Test Helpers -----------------------------------------------------

    type Journal = Arc<Mutex<Vec<String>>>;

    struct Recorder {
        key: TestScene,
        journal: Journal,
        /// Transition requested from `on_enter`.
        chain_to: Option<TestScene>,
    }

    impl Recorder {
        fn note(&self, what: &str) {
            self.journal.lock().unwrap().push(format!("{:?}.{}", self.key, what));
        }
    }

    impl Scene<TestScene> for Recorder {
        fn on_enter(&mut self, context: &mut GlobalContext<TestScene>) {
            self.note("enter");
            context.schedule_after(self.key, 100);
            context.media.play(self.key, Cue::Intro);
            if let Some(next) = self.chain_to {
                context.scene_transitions.push(next);
            }
        }

        fn on_exit(&mut self, _context: &mut GlobalContext<TestScene>) {
            self.note("exit");
        }

        fn update(&mut self, _context: &mut GlobalContext<TestScene>) {
            self.note("update");
        }

        fn on_deadline(&mut self, _id: DeadlineId, _context: &mut GlobalContext<TestScene>) {
            self.note("deadline");
        }

        fn on_media_complete(&mut self, _cue: Cue, _context: &mut GlobalContext<TestScene>) {
            self.note("media");
        }

        fn on_resume(&mut self, _context: &mut GlobalContext<TestScene>) {
            self.note("resume");
        }
    }

    fn setup() -> (SceneManager<TestScene>, GlobalContext<TestScene>, Journal) {
        let journal: Journal = Arc::default();
        let mut manager = SceneManager::new();
        for key in [TestScene::A, TestScene::B] {
            manager.register_scene(key, Recorder { key, journal: journal.clone(), chain_to: None });
        }
        manager.initial = Some(TestScene::A);

        let context = GlobalContext::headless(GameSettings::default());
        (manager, context, journal)
    }

    fn entries(journal: &Journal) -> Vec<String> {
        std::mem::take(&mut *journal.lock().unwrap())
    }

    //--- Transition Tests -------------------------------------------------

    #[test]
    fn start_enters_default_scene() {
        let (mut manager, mut context, journal) = setup();
        manager.start(&mut context);

        assert_eq!(manager.current(), Some(TestScene::A));
        assert_eq!(entries(&journal), vec!["A.enter"]);
    }

    #[test]
    fn transition_to_current_scene_is_noop() {
        let (mut manager, mut context, journal) = setup();
        manager.start(&mut context);
        entries(&journal);

        assert!(manager.transition(TestScene::A, &mut context).is_ok());
        assert!(entries(&journal).is_empty(), "No enter/exit should fire");
    }

    #[test]
    fn exit_runs_strictly_before_enter() {
        let (mut manager, mut context, journal) = setup();
        manager.start(&mut context);
        entries(&journal);

        manager.transition(TestScene::B, &mut context).unwrap();
        manager.transition(TestScene::A, &mut context).unwrap();

        assert_eq!(entries(&journal), vec!["A.exit", "B.enter", "B.exit", "A.enter"]);
    }

    #[test]
    fn exit_cancels_deadlines_and_media_of_old_scene() {
        let (mut manager, mut context, _journal) = setup();
        manager.start(&mut context);
        assert_eq!(context.scheduler.len(), 1);
        assert!(context.media.is_playing(Cue::Intro));

        manager.transition(TestScene::B, &mut context).unwrap();

        assert_eq!(context.scheduler.len(), 1, "Only B's deadline remains");
        assert!(context.media.is_playing(Cue::Intro), "B restarted the cue");
    }

    #[test]
    fn unregistered_target_is_a_configuration_error() {
        let (mut manager, mut context, _journal) = setup();
        manager.start(&mut context);

        let result = manager.transition(TestScene::Unregistered, &mut context);
        assert_eq!(result, Err(ConfigurationError::UnregisteredScene(TestScene::Unregistered)));
        assert_eq!(manager.current(), Some(TestScene::Unregistered));
    }

    #[test]
    fn unregistered_scene_renders_placeholder() {
        let (mut manager, _, _journal) = setup();
        let renderer = RecordingRenderer::new();
        let log = renderer.log();
        let mut context = GlobalContext::headless(GameSettings::default());
        context.renderer = Box::new(renderer);

        manager.start(&mut context);
        let _ = manager.transition(TestScene::Unregistered, &mut context);
        manager.render(&mut context);

        assert!(log.contains_text("No handler for game state \"Unregistered\""));
    }

    #[test]
    fn transitions_requested_on_enter_wait_for_next_tick() {
        let journal: Journal = Arc::default();
        let mut manager = SceneManager::new();
        manager.register_default(
            TestScene::A,
            Recorder { key: TestScene::A, journal: journal.clone(), chain_to: None },
        );
        manager.register_scene(
            TestScene::B,
            Recorder { key: TestScene::B, journal: journal.clone(), chain_to: Some(TestScene::A) },
        );
        let mut context = GlobalContext::headless(GameSettings::default());
        manager.start(&mut context);

        context.scene_transitions.push(TestScene::B);
        manager.process_transitions(&mut context);
        assert_eq!(manager.current(), Some(TestScene::B));
        assert_eq!(context.scene_transitions.len(), 1, "Chained request is held back");

        manager.process_transitions(&mut context);
        assert_eq!(manager.current(), Some(TestScene::A));
    }

    //--- Delivery Tests ---------------------------------------------------

    #[test]
    fn deadlines_reach_only_their_owner() {
        let (mut manager, mut context, journal) = setup();
        manager.start(&mut context);
        context.schedule_after(TestScene::B, 0);
        entries(&journal);

        for _ in 0..10 {
            context.advance_tick();
            manager.dispatch_deadlines(&mut context);
        }

        assert_eq!(entries(&journal), vec!["A.deadline"], "B's deadline is stale");
    }

    #[test]
    fn suspension_cancels_deadlines_and_holds_media() {
        let (mut manager, mut context, journal) = setup();
        manager.start(&mut context);
        entries(&journal);

        manager.suspend(&mut context);
        assert!(manager.is_suspended());
        assert!(context.scheduler.is_empty());

        context.media.notify_ended(Cue::Intro);
        manager.dispatch_media(&mut context);
        manager.update(&mut context);
        assert!(entries(&journal).is_empty(), "Suspended scene gets nothing");

        manager.resume(&mut context);
        manager.dispatch_media(&mut context);
        assert_eq!(entries(&journal), vec!["A.resume", "A.media"]);
    }

    #[test]
    fn abandoning_drops_held_media_and_deadlines() {
        let (mut manager, mut context, journal) = setup();
        manager.start(&mut context);
        manager.suspend(&mut context);
        context.media.notify_ended(Cue::Intro);
        entries(&journal);

        manager.abandon(&mut context);
        assert!(manager.is_suspended(), "Stays frozen until replaced");
        assert!(context.scheduler.is_empty());
        assert!(context.media.take_completed().is_empty(), "Held completion is dropped");

        context.scene_transitions.push(TestScene::B);
        manager.dispatch_media(&mut context);
        manager.process_transitions(&mut context);
        assert_eq!(manager.current(), Some(TestScene::B));
        assert_eq!(entries(&journal), vec!["A.exit", "B.enter"], "A never resumes");
    }

    #[test]
    fn abandon_without_suspension_is_ignored() {
        let (mut manager, mut context, _journal) = setup();
        manager.start(&mut context);

        manager.abandon(&mut context);
        assert_eq!(context.scheduler.len(), 1);
        assert!(context.media.is_playing(Cue::Intro));
    }

    #[test]
    fn transition_clears_suspension() {
        let (mut manager, mut context, _journal) = setup();
        manager.start(&mut context);
        manager.suspend(&mut context);

        manager.transition(TestScene::B, &mut context).unwrap();
        assert!(!manager.is_suspended());
    }
}
