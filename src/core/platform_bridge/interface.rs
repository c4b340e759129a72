//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-core contract: the events the window host sends to the
// logic thread, and the errors the host can fail with.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::event::InputEvent;

//=== PlatformEvent =======================================================

/// Events sent from the platform thread to the core thread.
#[derive(Debug, Clone)]
pub(crate) enum PlatformEvent {
    /// Input gathered since the last redraw. Discrete events (clicks, keys,
    /// typed text) keep their order; continuous ones are coalesced.
    Inputs {
        discrete: Vec<InputEvent>,
        continuous: Vec<InputEvent>,
    },

    /// Window close requested.
    WindowClosed,
}

//=== PlatformError =======================================================

/// Window host failures. Reported by the engine, never retried.
#[derive(Debug, Error)]
pub(crate) enum PlatformError {
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(String),

    #[error("event loop error: {0}")]
    EventLoopExecution(String),

    #[error("window creation failed: {0}")]
    WindowCreation(String),
}

//=========================================================================
// Unit Tests
//=========================================================================
