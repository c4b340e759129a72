//=========================================================================
// Test Harness
//=========================================================================
//
// Drives the installed game through `GlobalSystems::update` with a
// headless context and scripted input. Media never ends on its own
// (cue length of an hour); tests finish cues explicitly.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{install, GameScene};
use crate::core::drawing::StrokeCanvas;
use crate::core::globals::{GlobalContext, GlobalSystems};
use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};
use crate::core::media::{Cue, HeadlessMedia, PlaybackLog, Sound};
use crate::core::render::{FrameLog, Point, RecordingRenderer};
use crate::core::session::Table;
use crate::game::dialog::option_rect;
use crate::settings::GameSettings;

//=== Constants ===========================================================

const NEVER_ENDS_MS: u64 = 3_600_000;
const DESIGN_SIZE: (f32, f32) = (1920.0, 1080.0);

const SCRIBBLE: [(f32, f32); 3] = [(400.0, 240.0), (450.0, 260.0), (500.0, 300.0)];
const CHECK: Point = Point::new(1230.0, 670.0);
const DRINK_PROP: Point = Point::new(1190.0, 360.0);
const SNACK_PROP: Point = Point::new(640.0, 160.0);

//=== Harness =============================================================

pub(crate) struct Harness {
    pub systems: GlobalSystems<GameScene>,
    pub context: GlobalContext<GameScene>,
    media: PlaybackLog,
    frame: FrameLog,
}

impl Harness {
    //--- Construction -----------------------------------------------------

    /// Fresh game, sitting in the loading screen.
    pub fn new() -> Self {
        Self::with_media(|settings| HeadlessMedia::new(&settings.media))
    }

    pub fn with_media<F>(media: F) -> Self
    where
        F: FnOnce(&GameSettings) -> HeadlessMedia,
    {
        Self::build(media, RecordingRenderer::new())
    }

    /// Renderer reporting `names` as missing assets.
    pub fn with_missing_visuals(names: &[&str]) -> Self {
        let renderer = RecordingRenderer::new().with_missing(names.iter().map(|n| n.to_string()));
        Self::build(|settings| HeadlessMedia::new(&settings.media), renderer)
    }

    /// Jumps straight into `scene`, optionally with a table picked.
    pub fn at(scene: GameScene, table: Option<Table>) -> Self {
        let mut harness = Self::new();
        if let Some(table) = table {
            harness.context.session.select_table(table);
        }
        harness
            .systems
            .scene_manager
            .transition(scene, &mut harness.context)
            .expect("game scenes are registered");
        harness.context.scene_transitions.clear();
        harness
    }

    fn build<F>(media: F, renderer: RecordingRenderer) -> Self
    where
        F: FnOnce(&GameSettings) -> HeadlessMedia,
    {
        let mut settings = GameSettings::default();
        settings.media.default_cue_ms = NEVER_ENDS_MS;

        let media = media(&settings);
        let media_log = media.log();
        let frame = renderer.log();

        let mut context = GlobalContext::new(
            settings,
            Box::new(media),
            Box::new(renderer),
            Box::new(StrokeCanvas::default()),
        );
        let mut systems = GlobalSystems::new();
        install(&mut systems);
        systems.start(&mut context);

        Self { systems, context, media: media_log, frame }
    }

    //--- Clock ------------------------------------------------------------

    pub fn tick(&mut self, events: Vec<InputEvent>) {
        self.context.frame_events.push(events);
        self.systems.update(&mut self.context);
    }

    pub fn idle(&mut self) {
        self.tick(Vec::new());
    }

    pub fn wait_ms(&mut self, ms: u64) {
        for _ in 0..self.context.settings.ticks_for(ms) {
            self.idle();
        }
    }

    /// Ends `cue` as if playback had finished, then runs one tick.
    pub fn finish_cue(&mut self, cue: Cue) {
        self.context.media.notify_ended(cue);
        self.idle();
    }

    pub fn run_until(&mut self, scene: GameScene, max_ticks: usize) {
        for _ in 0..max_ticks {
            if self.current() == Some(scene) {
                return;
            }
            self.idle();
        }
        assert_eq!(self.current(), Some(scene), "Scene not reached within {} ticks", max_ticks);
    }

    //--- Keyboard ---------------------------------------------------------

    pub fn press(&mut self, key: KeyCode) {
        self.tick(vec![
            InputEvent::KeyDown { key, modifiers: Modifiers::NONE },
            InputEvent::KeyUp { key, modifiers: Modifiers::NONE },
        ]);
    }

    pub fn press_enter(&mut self) {
        self.press(KeyCode::Enter);
    }

    pub fn press_backspace(&mut self, times: usize) {
        for _ in 0..times {
            self.press(KeyCode::Backspace);
        }
    }

    /// Ctrl+`key`; Ctrl is released on the following tick.
    pub fn press_with_ctrl(&mut self, key: KeyCode) {
        self.tick(vec![InputEvent::KeyDown { key, modifiers: Modifiers::CTRL }]);
        self.tick(vec![InputEvent::KeyUp { key, modifiers: Modifiers::NONE }]);
    }

    pub fn type_text(&mut self, text: &str) {
        self.tick(text.chars().map(InputEvent::Text).collect());
    }

    //--- Mouse ------------------------------------------------------------

    pub fn click_at(&mut self, point: Point) {
        self.tick(vec![
            InputEvent::MouseMoved { x: point.x, y: point.y },
            InputEvent::MouseButtonDown { button: MouseButton::Left, modifiers: Modifiers::NONE },
            InputEvent::MouseButtonUp { button: MouseButton::Left, modifiers: Modifiers::NONE },
        ]);
    }

    /// Click at a position given in the 1920x1080 table-selection space.
    pub fn click_design(&mut self, x: f32, y: f32) {
        let (w, h) = self.context.canvas();
        self.click_at(Point::new(x * w / DESIGN_SIZE.0, y * h / DESIGN_SIZE.1));
    }

    pub fn click_option(&mut self, index: usize) {
        self.click_at(option_rect(index, false).center());
    }

    pub fn click_check(&mut self) {
        self.click_at(CHECK);
    }

    /// One stroke across the drawing area, over three ticks.
    pub fn scribble(&mut self) {
        let [(x0, y0), (x1, y1), (x2, y2)] = SCRIBBLE;
        self.tick(vec![
            InputEvent::MouseMoved { x: x0, y: y0 },
            InputEvent::MouseButtonDown { button: MouseButton::Left, modifiers: Modifiers::NONE },
        ]);
        self.tick(vec![InputEvent::MouseMoved { x: x1, y: y1 }]);
        self.tick(vec![
            InputEvent::MouseMoved { x: x2, y: y2 },
            InputEvent::MouseButtonUp { button: MouseButton::Left, modifiers: Modifiers::NONE },
        ]);
    }

    /// Clicks the current mini-game's prop `times` times.
    pub fn drain_prop(&mut self, times: usize) {
        let prop = match self.current() {
            Some(GameScene::MiniGame3) => SNACK_PROP,
            _ => DRINK_PROP,
        };
        for _ in 0..times {
            self.click_at(prop);
        }
    }

    //--- Inspection -------------------------------------------------------

    pub fn current(&self) -> Option<GameScene> {
        self.systems.scene_manager.current()
    }

    /// Draw calls of the last rendered tick.
    pub fn frame(&self) -> FrameLog {
        self.frame.clone()
    }

    pub fn anxiety(&self) -> u8 {
        self.context.anxiety().level()
    }

    pub fn sounds(&self) -> Vec<Sound> {
        self.media.sounds()
    }
}
