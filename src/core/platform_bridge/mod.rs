//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the window host with the core thread.
//
// Components:
// - `interface`: event and error types (the contract)
// - `event_collector`: core-side draining of the channel each tick
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::{PlatformError, PlatformEvent};
