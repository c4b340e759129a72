//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use anxiety_cafe::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine facade and configuration
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::settings::GameSettings;

// Global systems and context
pub use crate::core::globals::{GlobalContext, GlobalSystems, Overlay, OverlayFrame, OverlayResponse};

// Input system
pub use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};

// Scene system
pub use crate::core::scene::{Scene, SceneKey, SceneManager};

// Scheduling, media and presentation
pub use crate::core::anxiety::{AnxietyChange, AnxietyCue};
pub use crate::core::drawing::{DrawMode, DrawingSnapshot, DrawingSurface};
pub use crate::core::media::{Cue, MediaBackend, Sound};
pub use crate::core::render::{Point, Rect, Renderer, Visual};
pub use crate::core::schedule::DeadlineId;
pub use crate::core::session::{Stage, Table};

// Message bus
pub use crate::core::message_bus::MessageBus;

// Game
pub use crate::game::GameScene;
