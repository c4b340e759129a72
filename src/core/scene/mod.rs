//=========================================================================
// Scene System
//=========================================================================
//
// Top-level game state machine: exactly one current scene, explicit
// enter/exit lifecycle, and event delivery to whichever scene owns it.
//
// Architecture:
//   SceneManager
//     ├─ scenes: HashMap<S, Box<dyn Scene<S>>>
//     ├─ current: Option<S>
//     └─ suspended: bool (quit confirmation open)
//
// Flow per tick:
//   on_deadline / on_media_complete → update → process_transitions
//   (exit old → cancel its deadlines and media → enter new)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;
use crate::core::media::Cue;
use crate::core::schedule::DeadlineId;

//=== Module Declarations =================================================

mod scene_manager;
mod transition_queue;

//=== Public API ==========================================================

pub use scene_manager::SceneManager;
pub use transition_queue::TransitionQueue;

//=== Scene Key Trait =====================================================

/// Marker trait for scene identifiers.
///
/// Typically implemented by a game-specific enum.
pub trait SceneKey: Clone + Copy + Eq + Hash + Debug + Send + 'static {}

//=== Scene Trait =========================================================

/// A top-level screen with its own lifecycle.
///
/// Only `update()` is required:
///
/// ```rust
/// # use anxiety_cafe::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum Screen { Title }
/// # impl SceneKey for Screen {}
/// struct Title;
///
/// impl Scene<Screen> for Title {
///     fn update(&mut self, context: &mut GlobalContext<Screen>) {
///         if context.input_state.is_key_pressed(KeyCode::Enter) {
///             // ...
///         }
///     }
/// }
/// ```
///
/// Deadlines and media a scene starts are tagged with its key and are
/// cancelled when it exits, so none of these hooks ever see work left
/// over from a previous visit.
pub trait Scene<S: SceneKey>: Send {
    /// Called when the scene becomes current.
    ///
    /// Transitions requested here are applied on the next tick.
    fn on_enter(&mut self, _context: &mut GlobalContext<S>) {}

    /// Called before another scene becomes current.
    fn on_exit(&mut self, _context: &mut GlobalContext<S>) {}

    /// Called once per tick while the scene is current and not suspended.
    fn update(&mut self, context: &mut GlobalContext<S>);

    /// A cue this scene started has finished.
    fn on_media_complete(&mut self, _cue: Cue, _context: &mut GlobalContext<S>) {}

    /// A deadline this scene scheduled is due.
    fn on_deadline(&mut self, _id: DeadlineId, _context: &mut GlobalContext<S>) {}

    /// The scene was suspended and is running again. Deadlines cancelled
    /// by the suspension must be scheduled again here.
    fn on_resume(&mut self, _context: &mut GlobalContext<S>) {}

    /// Draws the scene.
    fn render(&self, _context: &mut GlobalContext<S>) {}
}
