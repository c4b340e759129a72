//=========================================================================
// Overlay
//=========================================================================
//
// A layer drawn over every scene that gets input before the scene does
// (the game's HUD: anxiety meter, quit button, confirmation dialog).
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::GlobalContext;
use crate::core::scene::SceneKey;

//=== OverlayResponse =====================================================

/// What the overlay did with this tick's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayResponse {
    /// Input goes on to the scene.
    Pass,
    /// Input was used; the scene is not updated this tick.
    Consumed,
    /// Freeze the current scene (modal opened).
    Suspend,
    /// Unfreeze the current scene (modal dismissed).
    Resume,
    /// Leave the suspended scene for good. Its held work is dropped and
    /// the overlay has queued the next scene itself.
    Abandon,
}

//=== OverlayFrame ========================================================

/// Scene-manager state the overlay may react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayFrame<S: SceneKey> {
    pub scene: Option<S>,
    pub suspended: bool,
}

//=== Overlay Trait =======================================================

pub trait Overlay<S: SceneKey>: Send {
    fn handle_input(&mut self, frame: OverlayFrame<S>, context: &mut GlobalContext<S>)
        -> OverlayResponse;

    /// Runs before the scene draws (e.g. to apply screen shake).
    fn before_render(&mut self, _frame: OverlayFrame<S>, _context: &mut GlobalContext<S>) {}

    /// Draws on top of the scene.
    fn render(&self, frame: OverlayFrame<S>, context: &mut GlobalContext<S>);
}
