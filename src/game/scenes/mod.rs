//=========================================================================
// Game Scenes
//=========================================================================
//
// One module per top-level screen. The two conversations are data
// (`DialogTree`s) hosted by the generic `DialogScene`.
//
//=========================================================================

//=== Module Declarations =================================================

mod endings;
mod intro;
mod loading;
mod mini_game;
mod order_drink;
mod order_snack;
mod table_select;

//=== Internal Dependencies ===============================================

use crate::core::render::{Color, Rect, Renderer, Visual};

//=== Public API ==========================================================

pub use endings::Ending;
pub use intro::IntroScene;
pub use loading::LoadingScene;
pub use mini_game::{MiniGame, Phase, Prop, PropKind, DRAWING_BOUNDS};
pub use order_drink::{DrinkNode, DrinkOrder};
pub use order_snack::{SnackNode, SnackOrder};
pub use table_select::{pick_delta, Focus, TableSelect};

//=== Shared Helpers ======================================================

/// Draws `visual`, or a filled box in its place when the asset is missing.
pub(crate) fn draw_or_placeholder(renderer: &mut dyn Renderer, visual: &Visual, rect: Rect, fill: Color) {
    if !renderer.draw_visual(visual, rect) {
        renderer.draw_rect(rect, Some(fill), Some(Color::PLUM));
    }
}
