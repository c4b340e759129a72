//=========================================================================
// Anxiety Cafe: Binary Entry Point
//
// Usage:
//   anxiety_cafe [settings.json]
//
// Loads the settings (defaults when no file is given), builds a context
// on the headless media backend, installs the game and runs the engine.
// `RUST_LOG` overrides the default `info` filter.
//
//=========================================================================

use std::path::PathBuf;
use std::process::ExitCode;

use log::{error, info};

use anxiety_cafe::core::globals::GlobalContext;
use anxiety_cafe::game::{self, GameScene};
use anxiety_cafe::{EngineBuilder, GameSettings};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args().nth(1).map(PathBuf::from);
    let settings = match GameSettings::load_or_default(path.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Starting {}", settings.window.title);
    EngineBuilder::<GameScene>::from_settings(&settings)
        .build(GlobalContext::headless(settings))
        .init(game::install)
        .run();

    ExitCode::SUCCESS
}
