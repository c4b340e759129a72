//=========================================================================
// Anxiety Cafe
//=========================================================================
//
// The game itself: scene keys, the scenes, the two dialog trees and the
// HUD overlay, wired into the generic engine by `install()`.
//
// Scene flow:
//   Loading → Intro → TableSelect → MiniGame1 → OrderDrink → MiniGame2
//           → OrderSnack → MiniGame3 → Success
//
//   GameOver is reachable from any scene, either through the anxiety
//   meter reaching its maximum or through the quit confirmation.
//   Both end screens lead back to Intro.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod dialog;
pub mod hud;
pub mod scenes;

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalSystems;
use crate::core::scene::SceneKey;
use crate::core::session::Stage;

use dialog::DialogScene;
use hud::Hud;
use scenes::{
    DrinkOrder, Ending, IntroScene, LoadingScene, MiniGame, SnackOrder, TableSelect,
};

//=== GameScene ===========================================================

/// Top-level screens of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameScene {
    Loading,
    Intro,
    TableSelect,
    MiniGame1,
    OrderDrink,
    MiniGame2,
    OrderSnack,
    MiniGame3,
    Success,
    GameOver,
}

impl SceneKey for GameScene {}

impl GameScene {
    /// Scenes before the player has started a visit.
    pub fn is_preamble(self) -> bool {
        matches!(self, GameScene::Loading | GameScene::Intro)
    }

    pub fn is_ending(self) -> bool {
        matches!(self, GameScene::Success | GameScene::GameOver)
    }

    /// Scenes where the HUD offers the quit button.
    pub fn can_quit(self) -> bool {
        !self.is_preamble() && !self.is_ending()
    }
}

//=== Installation ========================================================

/// Registers every scene, the game-over rule and the HUD.
pub fn install(systems: &mut GlobalSystems<GameScene>) {
    let scenes = &mut systems.scene_manager;

    scenes.register_default(GameScene::Loading, LoadingScene::new());
    scenes.register_scene(GameScene::Intro, IntroScene::new());
    scenes.register_scene(GameScene::TableSelect, TableSelect::new());
    scenes.register_scene(GameScene::MiniGame1, MiniGame::new(Stage::One));
    scenes.register_scene(GameScene::OrderDrink, DialogScene::<DrinkOrder>::new());
    scenes.register_scene(GameScene::MiniGame2, MiniGame::new(Stage::Two));
    scenes.register_scene(GameScene::OrderSnack, DialogScene::<SnackOrder>::new());
    scenes.register_scene(GameScene::MiniGame3, MiniGame::new(Stage::Three));
    scenes.register_scene(GameScene::Success, Ending::success());
    scenes.register_scene(GameScene::GameOver, Ending::game_over());

    systems.set_game_over_scene(GameScene::GameOver);
    systems.set_overlay(Hud::new());
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod tests {
    use super::testing::Harness;
    use super::*;
    use crate::core::media::{Cue, TableShot};
    use crate::core::session::{Keepsake, Table};

    #[test]
    fn every_scene_is_registered() {
        let harness = Harness::new();
        let all = [
            GameScene::Loading,
            GameScene::Intro,
            GameScene::TableSelect,
            GameScene::MiniGame1,
            GameScene::OrderDrink,
            GameScene::MiniGame2,
            GameScene::OrderSnack,
            GameScene::MiniGame3,
            GameScene::Success,
            GameScene::GameOver,
        ];
        for scene in all {
            assert!(harness.systems.scene_manager.is_registered(scene), "{:?} has no handler", scene);
        }
    }

    #[test]
    fn full_playthrough_reaches_success() {
        let mut h = Harness::new();

        // Loading completes at once with the headless backend.
        h.run_until(GameScene::Intro, 5);
        h.press_enter();
        h.run_until(GameScene::TableSelect, 5);

        // Table 2: no anxiety on pick.
        h.click_design(1200.0, 250.0);
        h.finish_cue(Cue::Table(Table::Two, TableShot::Approach));
        h.click_design(300.0, 750.0);
        h.finish_cue(Cue::Table(Table::Two, TableShot::Settle));
        h.run_until(GameScene::MiniGame1, 5);
        assert_eq!(h.anxiety(), 0);

        // Stage 1: draw, check, thought bubble, outro.
        h.finish_cue(Cue::MiniGameIntro(Stage::One, Table::Two));
        h.scribble();
        h.click_check();
        h.finish_cue(Cue::ThoughtBubble);
        h.finish_cue(Cue::MiniGameOutro(Stage::One, Table::Two));
        h.run_until(GameScene::OrderDrink, 5);

        // Drink order: captions, subtitles, for here, yes, matcha, name.
        h.finish_cue(Cue::Line("M_Q1"));
        h.finish_cue(Cue::Line("M_Q2"));
        h.click_option(0);
        h.wait_ms(600);
        h.finish_cue(Cue::Line("M_Q3"));
        h.click_option(1);
        h.wait_ms(1100);
        h.finish_cue(Cue::Line("M_Q4.2"));
        h.click_option(0);
        h.wait_ms(600);
        h.finish_cue(Cue::Line("M_Q5"));
        h.click_option(0);
        h.wait_ms(600);
        h.finish_cue(Cue::Line("M_Q5.2"));
        h.click_option(0);
        h.wait_ms(1100);
        h.finish_cue(Cue::Line("M_Q6"));
        h.type_text("Mochi");
        h.press_enter();
        h.wait_ms(600);
        h.finish_cue(Cue::Line("M_Q7.1"));
        h.finish_cue(Cue::Line("M_Q7.3"));
        h.finish_cue(Cue::Line("M_Q8"));
        h.run_until(GameScene::MiniGame2, 5);

        assert_eq!(h.context.session.kept(Keepsake::PlayerName), Some("Mochi"));
        assert_eq!(h.context.session.kept(Keepsake::Drink), Some("Whisker Matcha"));

        // Stage 2: drain the drink, then check.
        h.finish_cue(Cue::MiniGameIntro(Stage::Two, Table::Two));
        assert!(h.context.drawing.has_content(), "Stage 1 drawing carries over");
        h.drain_prop(3);
        h.click_check();
        h.finish_cue(Cue::MiniGameOutro(Stage::Two, Table::Two));
        h.run_until(GameScene::OrderSnack, 5);

        // Snack order: understand the waiter on the second try.
        h.finish_cue(Cue::Line("P_Q1"));
        h.click_option(0);
        h.wait_ms(1100);
        h.finish_cue(Cue::Line("P_Q1.1"));
        h.click_option(1);
        h.wait_ms(600);
        h.finish_cue(Cue::Line("P_Q3"));
        h.click_option(2);
        h.wait_ms(1100);
        h.finish_cue(Cue::Line("P_Q4"));
        h.type_text("to go");
        h.press_enter();
        h.wait_ms(600);
        h.finish_cue(Cue::Line("P_Q5.3"));
        h.type_text("Mo");
        h.press_enter();
        h.wait_ms(600);
        assert!(h.frame().contains_text("Order for: Mochi"));
        assert!(h.frame().contains_text("Item: Black eye croissant"));
        h.finish_cue(Cue::Line("P_Q6"));
        h.run_until(GameScene::MiniGame3, 5);

        // Stage 3: eat the snack, then check.
        h.finish_cue(Cue::MiniGameIntro(Stage::Three, Table::Two));
        h.drain_prop(4);
        h.click_check();
        h.finish_cue(Cue::MiniGameOutro(Stage::Three, Table::Two));
        h.run_until(GameScene::Success, 5);

        assert_eq!(h.anxiety(), 0, "Every relief step floors at zero");
        assert!(h.frame().contains_text("Press ENTER to play again"));

        h.press_enter();
        h.run_until(GameScene::Intro, 5);
        assert_eq!(h.context.session.table(), None, "Play again resets the session");
    }
}
