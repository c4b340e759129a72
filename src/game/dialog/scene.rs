//=========================================================================
// Dialog Scene
//=========================================================================
//
// Hosts a `DialogMachine` as a top-level scene: feeds it keyboard and
// mouse input, forwards media ends and deadlines, draws the current cue,
// the options and the node captions, and leaves through the tree's exit.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use super::{DialogMachine, DialogTree, OptionBody};
use crate::core::globals::GlobalContext;
use crate::core::input::KeyCode;
use crate::core::media::Cue;
use crate::core::render::{Color, Point, Rect, TextStyle, Visual};
use crate::core::scene::Scene;
use crate::core::schedule::DeadlineId;
use crate::game::GameScene;

//=== Constants ===========================================================

const LABEL_SIZE: f32 = 18.0;
const FIELD_TEXT_SIZE: f32 = 20.0;
const CAPTION_SIZE: f32 = 28.0;
const CAPTION_SPACING: f32 = 40.0;

//=== DialogScene =========================================================

pub struct DialogScene<T: DialogTree> {
    machine: DialogMachine<T>,
    leaving: bool,
}

impl<T: DialogTree> DialogScene<T> {
    pub fn new() -> Self {
        Self {
            machine: DialogMachine::new(),
            leaving: false,
        }
    }

    pub fn machine(&self) -> &DialogMachine<T> {
        &self.machine
    }
}

impl<T: DialogTree> Default for DialogScene<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DialogTree> Scene<GameScene> for DialogScene<T> {
    fn on_enter(&mut self, context: &mut GlobalContext<GameScene>) {
        self.leaving = false;
        self.machine.start(context);
    }

    fn update(&mut self, context: &mut GlobalContext<GameScene>) {
        let typed: Vec<char> = context.input_state.typed().to_vec();
        for c in typed {
            self.machine.type_char(c);
        }
        if context.input_state.is_key_pressed(KeyCode::Backspace) {
            self.machine.backspace();
        }
        if context.input_state.is_key_pressed(KeyCode::Enter) {
            self.machine.submit(context);
        }
        if let Some(point) = context.clicked() {
            self.machine.click(point, context);
        }

        if self.machine.is_finished() && !self.leaving {
            self.leaving = true;
            let next = T::exit(context);
            info!(target: "dialog", "{:?} finished, heading to {:?}", T::SCENE, next);
            context.scene_transitions.push(next);
        }
    }

    fn on_media_complete(&mut self, cue: Cue, context: &mut GlobalContext<GameScene>) {
        self.machine.on_media_complete(cue, context);
    }

    fn on_deadline(&mut self, id: DeadlineId, context: &mut GlobalContext<GameScene>) {
        self.machine.on_deadline(id, context);
    }

    fn on_resume(&mut self, context: &mut GlobalContext<GameScene>) {
        self.machine.resume(context);
    }

    fn render(&self, context: &mut GlobalContext<GameScene>) {
        let (w, h) = context.canvas();
        let screen = Rect::new(0.0, 0.0, w, h);
        context.renderer.clear(Color::BLACK);

        if let Some(cue) = self.machine.current_cue() {
            if !context.renderer.draw_visual(&Visual::Frame(cue), screen) {
                context.renderer.draw_rect(screen, Some(Color::PLUM), None);
                context.renderer.draw_text(
                    &cue.catalog_name(),
                    screen.center(),
                    TextStyle::new(CAPTION_SIZE, Color::CREAM).centered(),
                );
            }
        }

        for option in self.machine.options() {
            match &option.body {
                OptionBody::Choice { label } => {
                    if !context.renderer.draw_visual(&Visual::image(option.image), option.rect) {
                        context.renderer.draw_rect(option.rect, Some(Color::CREAM), Some(Color::PLUM));
                        context.renderer.draw_text(
                            label,
                            option.rect.center(),
                            TextStyle::new(LABEL_SIZE, Color::PLUM).centered(),
                        );
                    }
                }
                OptionBody::TextInput(field) => {
                    if !context.renderer.draw_visual(&Visual::image(option.image), option.rect) {
                        context.renderer.draw_rect(option.rect, Some(Color::WHITE), Some(Color::PLUM));
                    }
                    context.renderer.draw_text(
                        field.value(),
                        Point::new(option.rect.x + 10.0, option.rect.y + 10.0),
                        TextStyle::new(FIELD_TEXT_SIZE, Color::BLACK),
                    );

                    if let Some(check) = option.check_rect().filter(|_| field.is_committable()) {
                        if !context.renderer.draw_visual(&Visual::image("check"), check) {
                            context.renderer.draw_rect(check, Some(Color::CALM), None);
                        }
                    }
                }
            }
        }

        let captions = T::captions(self.machine.node(), &context.session);
        for (i, line) in captions.iter().enumerate() {
            context.renderer.draw_text(
                line,
                Point::new(w / 2.0, h - 120.0 + CAPTION_SPACING * i as f32),
                TextStyle::new(CAPTION_SIZE, Color::WHITE).centered(),
            );
        }
    }
}
