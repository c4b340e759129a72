//=========================================================================
// End Screens
//=========================================================================
//
// Success and GameOver share one scene type: play the ending clip, wait
// for Enter, reset the session and start over from the intro.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;
use crate::core::input::KeyCode;
use crate::core::media::Cue;
use crate::core::render::{Color, Point, Rect, TextStyle, Visual};
use crate::core::scene::Scene;
use crate::game::GameScene;

//=== Ending ==============================================================

#[derive(Debug, Clone, Copy)]
pub struct Ending {
    scene: GameScene,
    cue: Cue,
    /// Shown when the ending clip is missing.
    title: &'static str,
}

impl Ending {
    pub fn success() -> Self {
        Self {
            scene: GameScene::Success,
            cue: Cue::Success,
            title: "You got your order!",
        }
    }

    pub fn game_over() -> Self {
        Self {
            scene: GameScene::GameOver,
            cue: Cue::GameOver,
            title: "Too anxious to stay...",
        }
    }
}

impl Scene<GameScene> for Ending {
    fn on_enter(&mut self, context: &mut GlobalContext<GameScene>) {
        context.media.play(self.scene, self.cue);
    }

    fn update(&mut self, context: &mut GlobalContext<GameScene>) {
        if context.input_state.is_key_pressed(KeyCode::Enter) {
            info!("Playing again from {:?}", self.scene);
            context.reset_session();
            context.scene_transitions.push(GameScene::Intro);
        }
    }

    fn render(&self, context: &mut GlobalContext<GameScene>) {
        let (w, h) = context.canvas();
        context.renderer.clear(Color::BLACK);

        if !context.renderer.draw_visual(&Visual::Frame(self.cue), Rect::new(0.0, 0.0, w, h)) {
            context.renderer.draw_text(
                self.title,
                Point::new(w / 2.0, h / 2.0 - 40.0),
                TextStyle::new(40.0, Color::CREAM).centered(),
            );
        }
        context.renderer.draw_text(
            "Press ENTER to play again",
            Point::new(w / 2.0, h - 60.0),
            TextStyle::new(24.0, Color::WHITE).centered(),
        );
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
