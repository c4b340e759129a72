//=========================================================================
// Mini-Games
//=========================================================================
//
// One drawing scene parameterized by stage. All three share the canvas,
// the pencil/eraser tools and the completion check; stages 2 and 3 add
// a prop the player has to finish before checking out.
//
// Phases (strictly forward):
//   Intro → Interactive → ThoughtBubble (stage 1 only) → Completion
//
// Carry-over:
//   The drawing is captured into the session at the check click. The
//   next stage restores it when its intro ends, and the outro of every
//   stage composites it over the closing cue.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::draw_or_placeholder;
use crate::core::drawing::DrawMode;
use crate::core::globals::GlobalContext;
use crate::core::input::{KeyCode, MouseButton};
use crate::core::media::{Cue, Sound};
use crate::core::render::{Color, Rect, Visual};
use crate::core::scene::Scene;
use crate::core::session::{Stage, Table};
use crate::game::GameScene;

//=== Layout ==============================================================

/// Area of the screen that accepts strokes.
pub const DRAWING_BOUNDS: Rect = Rect::new(380.0, 220.0, 520.0, 320.0);

const TOOL_SIZE: f32 = 50.0;
const PROP_SIZE: f32 = 120.0;
const CHECK_SIZE: f32 = 60.0;

fn pencil_rect((w, h): (f32, f32)) -> Rect {
    Rect::new(w - 120.0, h - 180.0, TOOL_SIZE, TOOL_SIZE)
}

fn eraser_rect((w, h): (f32, f32)) -> Rect {
    Rect::new(w - 120.0, h - 120.0, TOOL_SIZE, TOOL_SIZE)
}

fn check_rect((w, h): (f32, f32)) -> Rect {
    Rect::new(w - 80.0, h - 80.0, CHECK_SIZE, CHECK_SIZE)
}

//=== Phase ===============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Intro,
    Interactive,
    ThoughtBubble,
    Completion,
}

//=== Prop ================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKind {
    Drink,
    Snack,
}

/// Something on the table that gets finished one click at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prop {
    kind: PropKind,
    step: usize,
}

impl Prop {
    pub fn new(kind: PropKind) -> Self {
        Self { kind, step: 0 }
    }

    fn stages(&self) -> &'static [&'static str] {
        match self.kind {
            PropKind::Drink => &["drinkFull", "drinkMid", "drinkEmpty"],
            PropKind::Snack => &["snackFull", "snackOneBite", "snackHalf", "snackCrumbs"],
        }
    }

    /// Image of the current depletion stage.
    pub fn image(&self) -> &'static str {
        let stages = self.stages();
        stages[self.step.min(stages.len() - 1)]
    }

    /// Moves one stage on. Returns `false` once nothing is left.
    pub fn advance(&mut self) -> bool {
        if self.is_depleted() {
            return false;
        }
        self.step += 1;
        true
    }

    pub fn is_depleted(&self) -> bool {
        self.step + 1 >= self.stages().len()
    }

    pub fn rect(&self, canvas: (f32, f32)) -> Rect {
        Self::rect_for(self.kind, canvas)
    }

    fn rect_for(kind: PropKind, (w, _h): (f32, f32)) -> Rect {
        match kind {
            PropKind::Drink => Rect::new(w - 150.0, 300.0, PROP_SIZE, PROP_SIZE),
            PropKind::Snack => Rect::new(w / 2.0 - 60.0, 100.0, PROP_SIZE, PROP_SIZE),
        }
    }
}

//=== MiniGame ============================================================

pub struct MiniGame {
    stage: Stage,
    table: Table,
    phase: Phase,
    prop: Option<Prop>,
}

impl MiniGame {
    //--- Construction -----------------------------------------------------

    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            table: Table::One,
            phase: Phase::Intro,
            prop: Self::prop_for(stage),
        }
    }

    fn prop_for(stage: Stage) -> Option<Prop> {
        match stage {
            Stage::One => None,
            Stage::Two => Some(Prop::new(PropKind::Drink)),
            Stage::Three => Some(Prop::new(PropKind::Snack)),
        }
    }

    //--- Query API --------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn prop(&self) -> Option<Prop> {
        self.prop
    }

    /// The scene hosting this stage.
    pub fn scene(&self) -> GameScene {
        match self.stage {
            Stage::One => GameScene::MiniGame1,
            Stage::Two => GameScene::MiniGame2,
            Stage::Three => GameScene::MiniGame3,
        }
    }

    /// Where the game goes after this stage's outro.
    pub fn next_scene(&self) -> GameScene {
        match self.stage {
            Stage::One => GameScene::OrderDrink,
            Stage::Two => GameScene::OrderSnack,
            Stage::Three => GameScene::Success,
        }
    }

    /// The check shows once something is drawn and the prop is finished.
    pub fn can_complete(&self, context: &GlobalContext<GameScene>) -> bool {
        context.drawing.has_content() && self.prop.map_or(true, |prop| prop.is_depleted())
    }

    //--- Internal Helpers -------------------------------------------------

    fn advance_to(&mut self, next: Phase) -> bool {
        if next <= self.phase {
            warn!("{:?} refused to go back from {:?} to {:?}", self.scene(), self.phase, next);
            return false;
        }
        debug!("{:?}: {:?} -> {:?}", self.scene(), self.phase, next);
        self.phase = next;
        true
    }

    fn begin_interaction(&mut self, context: &mut GlobalContext<GameScene>) {
        if !self.advance_to(Phase::Interactive) {
            return;
        }

        match self.stage.previous() {
            None => {
                context.media.play_looping(self.scene(), Cue::MiniGameBackdrop(self.table));
                context.media.play_looping(self.scene(), Cue::TableAmbience(self.table));
            }
            Some(previous) => match context.session.drawing(previous) {
                Some(snapshot) => context.drawing.restore(snapshot),
                None => debug!("No drawing from {:?} to carry over", previous),
            },
        }
    }

    fn handle_click(&mut self, context: &mut GlobalContext<GameScene>) -> bool {
        let Some(point) = context.clicked() else { return false };
        let canvas = context.canvas();

        if pencil_rect(canvas).contains(point) {
            context.drawing.set_mode(DrawMode::Draw);
            context.media.play_sound(Sound::Pencil, 1.0);
            return true;
        }
        if eraser_rect(canvas).contains(point) {
            context.drawing.set_mode(DrawMode::Erase);
            context.media.play_sound(Sound::Eraser, 1.0);
            return true;
        }

        if let Some(prop) = self.prop.as_mut() {
            if prop.rect(canvas).contains(point) {
                if prop.advance() {
                    trace!("Prop now {}", prop.image());
                    context.ease_anxiety(1);
                    context.media.play_sound(Sound::Click, 1.0);
                }
                return true;
            }
        }

        if check_rect(canvas).contains(point) && self.can_complete(context) {
            self.complete(context);
            return true;
        }

        false
    }

    fn complete(&mut self, context: &mut GlobalContext<GameScene>) {
        context.drawing.handle_pointer_up();
        let snapshot = context.drawing.snapshot();
        info!("{:?} complete ({} strokes)", self.scene(), snapshot.stroke_count());
        context.session.capture_drawing(self.stage, snapshot);
        context.media.play_sound(Sound::Click, 1.0);

        match self.stage {
            Stage::One => {
                context.media.stop(Cue::MiniGameBackdrop(self.table));
                context.media.stop(Cue::TableAmbience(self.table));
                if self.advance_to(Phase::ThoughtBubble) {
                    context.media.play_polled(self.scene(), Cue::ThoughtBubble);
                }
            }
            Stage::Two => self.begin_completion(context),
            Stage::Three => {
                context.ease_anxiety(2);
                self.begin_completion(context);
            }
        }
    }

    fn begin_completion(&mut self, context: &mut GlobalContext<GameScene>) {
        if self.advance_to(Phase::Completion) {
            context
                .media
                .play(self.scene(), Cue::MiniGameOutro(self.stage, self.table));
        }
    }

    fn render_interactive(&self, context: &mut GlobalContext<GameScene>) {
        let canvas = context.canvas();
        let screen = Rect::new(0.0, 0.0, canvas.0, canvas.1);

        let backdrop = match self.stage {
            Stage::One => Visual::Frame(Cue::MiniGameBackdrop(self.table)),
            _ => Visual::image(format!("miniT{}", self.table.number())),
        };
        draw_or_placeholder(context.renderer.as_mut(), &backdrop, screen, Color::CREAM);

        let snapshot = context.drawing.snapshot();
        context.renderer.draw_rect(DRAWING_BOUNDS, None, Some(Color::PLUM));
        context.renderer.draw_snapshot(&snapshot, DRAWING_BOUNDS);

        let active = match context.drawing.mode() {
            DrawMode::Draw => pencil_rect(canvas),
            DrawMode::Erase => eraser_rect(canvas),
        };
        draw_or_placeholder(context.renderer.as_mut(), &Visual::image("pencil"), pencil_rect(canvas), Color::WHITE);
        draw_or_placeholder(context.renderer.as_mut(), &Visual::image("eraser"), eraser_rect(canvas), Color::WHITE);
        context.renderer.draw_rect(active, None, Some(Color::CALM));

        if let Some(prop) = self.prop {
            if prop.kind == PropKind::Snack {
                let mug = Prop::rect_for(PropKind::Drink, canvas);
                draw_or_placeholder(context.renderer.as_mut(), &Visual::image("drinkEmpty"), mug, Color::CREAM);
            }
            draw_or_placeholder(context.renderer.as_mut(), &Visual::image(prop.image()), prop.rect(canvas), Color::CREAM);
        }

        if self.can_complete(context) {
            draw_or_placeholder(context.renderer.as_mut(), &Visual::image("check"), check_rect(canvas), Color::CALM);
        }
    }
}

//=== Scene Implementation ================================================

impl Scene<GameScene> for MiniGame {
    fn on_enter(&mut self, context: &mut GlobalContext<GameScene>) {
        self.table = context.session.table().unwrap_or_else(|| {
            warn!("{:?} entered without a table, using table one", self.scene());
            Table::One
        });
        self.phase = Phase::Intro;
        self.prop = Self::prop_for(self.stage);

        context.drawing.set_bounds(DRAWING_BOUNDS);
        context.drawing.clear();
        context.drawing.set_mode(DrawMode::Draw);

        context
            .media
            .play(self.scene(), Cue::MiniGameIntro(self.stage, self.table));
    }

    fn on_exit(&mut self, context: &mut GlobalContext<GameScene>) {
        context.drawing.handle_pointer_up();
    }

    fn update(&mut self, context: &mut GlobalContext<GameScene>) {
        if self.phase != Phase::Interactive {
            return;
        }

        if context.input_state.ctrl_held() {
            if context.input_state.is_key_pressed(KeyCode::KeyZ) {
                context.drawing.undo();
            }
            if context.input_state.is_key_pressed(KeyCode::KeyY) {
                context.drawing.redo();
            }
        }

        if self.handle_click(context) {
            return;
        }

        if let Some(point) = context.input_state.drag() {
            context.drawing.handle_pointer_drag(point);
        }
        if context.input_state.is_button_released(MouseButton::Left) {
            context.drawing.handle_pointer_up();
        }
    }

    fn on_media_complete(&mut self, cue: Cue, context: &mut GlobalContext<GameScene>) {
        match (self.phase, cue) {
            (Phase::Intro, Cue::MiniGameIntro(..)) => self.begin_interaction(context),
            (Phase::ThoughtBubble, Cue::ThoughtBubble) => self.begin_completion(context),
            (Phase::Completion, Cue::MiniGameOutro(..)) => {
                context.scene_transitions.push(self.next_scene());
            }
            _ => trace!("{:?} ignoring end of {:?} in {:?}", self.scene(), cue, self.phase),
        }
    }

    fn render(&self, context: &mut GlobalContext<GameScene>) {
        let (w, h) = context.canvas();
        let screen = Rect::new(0.0, 0.0, w, h);
        context.renderer.clear(Color::BLACK);

        match self.phase {
            Phase::Intro => {
                let intro = Visual::Frame(Cue::MiniGameIntro(self.stage, self.table));
                draw_or_placeholder(context.renderer.as_mut(), &intro, screen, Color::PLUM);
            }
            Phase::Interactive => self.render_interactive(context),
            Phase::ThoughtBubble => {
                draw_or_placeholder(context.renderer.as_mut(), &Visual::Frame(Cue::ThoughtBubble), screen, Color::PLUM);
            }
            Phase::Completion => {
                let outro = Visual::Frame(Cue::MiniGameOutro(self.stage, self.table));
                draw_or_placeholder(context.renderer.as_mut(), &outro, screen, Color::PLUM);
                if let Some(snapshot) = context.session.drawing(self.stage) {
                    context.renderer.draw_snapshot(snapshot, DRAWING_BOUNDS);
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
