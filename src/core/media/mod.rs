//=========================================================================
// Media System
//=========================================================================
//
// Consumes audio/video through a narrow backend contract.
//
// Components:
// - `cue`: enum-keyed catalog (`Cue`, `Sound`, `TableShot`)
// - `deck`: `MediaBackend` contract and the owner-aware `MediaDeck`
// - `headless`: simulated-clock backend used by the binary and tests
//
//=========================================================================

//=== Module Declarations =================================================

mod cue;
mod deck;
mod headless;

//=== Public API ==========================================================

pub use cue::{Cue, Sound, TableShot};
pub use deck::{LoadProgress, MediaBackend, MediaCompleted, MediaDeck, MediaError, Progress};
pub use headless::{HeadlessMedia, PlaybackEvent, PlaybackLog};
