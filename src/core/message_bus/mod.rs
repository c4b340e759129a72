//=========================================================================
// Message Bus
//=========================================================================
//
// Per-frame, type-keyed message queues shared by scenes and overlays.
//
// Components:
// - `message_bus`: the bus itself (`push` / `read` / `clear_all`)
// - `message_queue`: type-erased queue storage
//
// The game publishes `AnxietyCue`s here; the HUD reads them during the
// same tick's render and the bus is cleared at the tick boundary.
//
//=========================================================================

//=== Module Declarations =================================================

mod message_bus;
mod message_queue;

//=== Public API ==========================================================

pub use message_bus::{Message, MessageBus};
