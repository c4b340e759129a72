//=========================================================================
// Intro
//=========================================================================

//=== Internal Dependencies ===============================================

use super::draw_or_placeholder;
use crate::core::globals::GlobalContext;
use crate::core::input::KeyCode;
use crate::core::media::Cue;
use crate::core::render::{Color, Point, Rect, TextStyle, Visual};
use crate::core::scene::Scene;
use crate::game::GameScene;

//=== IntroScene ==========================================================

/// Plays the opening clip; Enter skips it.
#[derive(Debug, Default)]
pub struct IntroScene;

impl IntroScene {
    pub fn new() -> Self {
        Self
    }
}

impl Scene<GameScene> for IntroScene {
    fn on_enter(&mut self, context: &mut GlobalContext<GameScene>) {
        context.media.play(GameScene::Intro, Cue::Intro);
    }

    fn update(&mut self, context: &mut GlobalContext<GameScene>) {
        if context.input_state.is_key_pressed(KeyCode::Enter) {
            context.scene_transitions.push(GameScene::TableSelect);
        }
    }

    fn on_media_complete(&mut self, cue: Cue, context: &mut GlobalContext<GameScene>) {
        if cue == Cue::Intro {
            context.scene_transitions.push(GameScene::TableSelect);
        }
    }

    fn render(&self, context: &mut GlobalContext<GameScene>) {
        let (w, h) = context.canvas();
        context.renderer.clear(Color::BLACK);
        draw_or_placeholder(
            context.renderer.as_mut(),
            &Visual::Frame(Cue::Intro),
            Rect::new(0.0, 0.0, w, h),
            Color::BLACK,
        );
        context.renderer.draw_text(
            "Press ENTER to skip",
            Point::new(w - 100.0, h - 30.0),
            TextStyle::new(16.0, Color::WHITE).centered(),
        );
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
