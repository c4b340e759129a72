//=========================================================================
// Anxiety Cafe: Library Root
//
// This crate defines the public API surface of the Anxiety Cafe game.
//
// Responsibilities:
// - Expose the engine facade (`Engine`, `EngineBuilder`)
// - Expose the generic scene/dialog machinery in `core`
// - Expose the concrete game (scenes, dialog trees, HUD) in `game`
// - Keep the winit host (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use anxiety_cafe::{EngineBuilder, GameSettings};
// use anxiety_cafe::core::globals::GlobalContext;
//
// let settings = GameSettings::default();
// let context = GlobalContext::headless(settings.clone());
//
// EngineBuilder::from_settings(&settings)
//     .build(context)
//     .init(anxiety_cafe::game::install)
//     .run();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the scene state machine, scheduler, anxiety meter,
// media deck and the collaborator traits (renderer, drawing surface).
//
// `game` contains the cafe itself: scene keys, scenes, dialog trees
// and the HUD overlay.
//
// `settings` holds the serde-backed configuration.
//
pub mod core;
pub mod game;
pub mod prelude;
pub mod settings;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the winit window and input host and is kept
// private, as it is not part of the public API surface.
//
// `engine` defines the main entry point and initialization logic.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
pub use settings::{GameSettings, SettingsError};
