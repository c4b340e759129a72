//=========================================================================
// Global Engine State
//=========================================================================
//
// Separates systems (per-tick logic) from context (shared data).
//
// Architecture:
//   GlobalSystems: SceneManager + Overlay + game-over rule (orchestrator)
//   GlobalContext: input, transitions, scheduler, media, renderer,
//                  drawing surface, session, anxiety (passed to scenes)
//
//=========================================================================

//=== Module Declarations =================================================

mod global_context;
mod global_systems;
mod overlay;

//=== Public API ==========================================================

pub use global_context::GlobalContext;
pub use global_systems::GlobalSystems;
pub use overlay::{Overlay, OverlayFrame, OverlayResponse};
