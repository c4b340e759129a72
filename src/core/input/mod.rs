//=========================================================================
// Input System
//=========================================================================
//
// Engine-side input types and the per-frame state tracker.
//
// Architecture:
//   Platform → InputEvent batches → GlobalSystems → StateTracker
//                                                      ↓
//                                      Scenes / HUD query it each tick
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod state_tracker;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use state_tracker::StateTracker;
