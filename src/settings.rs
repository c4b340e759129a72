//=========================================================================
// Game Settings
//=========================================================================
//
// Serde-backed configuration for the runtime, the window, the dialog
// timing constants and the headless media catalog.
//
// Flow:
//   settings.json (optional) → GameSettings::load() → validate() → Engine
//
// Every field has a default, so a partial file only overrides what it
// names. Wall-clock delays are stored in milliseconds and converted to
// tick counts through `ticks_for()`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== SettingsError =======================================================

/// Errors raised while loading or validating [`GameSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

//=== GameSettings ========================================================

/// Top-level configuration for one run of the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Logic ticks per second on the core thread.
    pub tps: f64,

    /// Capacity of the platform → core event channel.
    pub channel_capacity: usize,

    pub window: WindowSettings,

    /// Maximum characters accepted by dialog text fields.
    pub text_input_max_len: usize,

    pub timing: TimingSettings,

    pub media: MediaSettings,
}

/// Window title and logical canvas size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

/// Delays used by the dialog trees and the loading screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    /// Delay between choosing an option and its anxiety change.
    pub anxiety_delay_ms: u64,

    /// Delay between choosing an option and moving to its next node.
    pub advance_delay_ms: u64,

    /// How long the "try again / quit" options stay locked after a refusal.
    pub blocked_options_ms: u64,

    /// Loading screen watchdog.
    pub loading_watchdog_ms: u64,

    /// Loading screen hard timeout.
    pub loading_timeout_ms: u64,

    /// Load fraction at which the watchdog lets the game start.
    pub watchdog_threshold: f32,
}

/// Catalog data for the headless media backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaSettings {
    /// Duration used for any cue not listed in `durations_ms`.
    pub default_cue_ms: u64,

    /// Per-cue durations keyed by catalog name (e.g. `"M_Q1"`).
    pub durations_ms: BTreeMap<String, u64>,

    /// Catalog names that behave as missing assets.
    pub missing: Vec<String>,
}

//--- Defaults ------------------------------------------------------------

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 1024,
            window: WindowSettings::default(),
            text_input_max_len: 10,
            timing: TimingSettings::default(),
            media: MediaSettings::default(),
        }
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Anxiety Cafe".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            anxiety_delay_ms: 1000,
            advance_delay_ms: 500,
            blocked_options_ms: 3000,
            loading_watchdog_ms: 15_000,
            loading_timeout_ms: 20_000,
            watchdog_threshold: 0.9,
        }
    }
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            default_cue_ms: 3000,
            durations_ms: BTreeMap::new(),
            missing: Vec::new(),
        }
    }
}

//=== Public API ==========================================================

impl GameSettings {
    //--- Loading ----------------------------------------------------------

    /// Reads and validates a JSON settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let settings: Self = serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        settings.validate()?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Loads `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Rejects values the runtime cannot work with.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.tps > 0.0) {
            return Err(SettingsError::Invalid {
                field: "tps",
                reason: format!("must be positive, got {}", self.tps),
            });
        }
        if self.channel_capacity == 0 {
            return Err(SettingsError::Invalid {
                field: "channel_capacity",
                reason: "must be positive".to_string(),
            });
        }
        if self.text_input_max_len == 0 {
            return Err(SettingsError::Invalid {
                field: "text_input_max_len",
                reason: "must be positive".to_string(),
            });
        }
        let threshold = self.timing.watchdog_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(SettingsError::Invalid {
                field: "timing.watchdog_threshold",
                reason: format!("must be in (0, 1], got {}", threshold),
            });
        }
        Ok(())
    }

    //--- Derived Values ---------------------------------------------------

    /// Converts a wall-clock delay into a number of logic ticks.
    ///
    /// Rounds up, and never returns 0 for a non-zero delay.
    pub fn ticks_for(&self, ms: u64) -> u64 {
        if ms == 0 {
            return 0;
        }
        let ticks = (ms as f64 * self.tps / 1000.0).ceil() as u64;
        ticks.max(1)
    }

    /// Wall-clock time covered by the first `ticks` logic ticks, in whole
    /// milliseconds. Rounds down, so `elapsed_ms(ticks_for(ms)) >= ms`.
    pub fn elapsed_ms(&self, ticks: u64) -> u64 {
        (ticks as f64 * 1000.0 / self.tps).floor() as u64
    }

    /// Canvas size as floats, for layout math.
    pub fn canvas(&self) -> (f32, f32) {
        (self.window.width as f32, self.window.height as f32)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write settings");
        file
    }

    //--- Defaults ---------------------------------------------------------

    #[test]
    fn defaults_match_game_constants() {
        let settings = GameSettings::default();
        assert_eq!(settings.tps, 60.0);
        assert_eq!(settings.text_input_max_len, 10);
        assert_eq!(settings.window.width, 1280);
        assert_eq!(settings.window.height, 720);
        assert_eq!(settings.timing.anxiety_delay_ms, 1000);
        assert_eq!(settings.timing.advance_delay_ms, 500);
        assert_eq!(settings.timing.blocked_options_ms, 3000);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn ticks_for_rounds_up() {
        let settings = GameSettings::default();
        assert_eq!(settings.ticks_for(0), 0);
        assert_eq!(settings.ticks_for(1), 1, "Non-zero delays take at least one tick");
        assert_eq!(settings.ticks_for(500), 30);
        assert_eq!(settings.ticks_for(1000), 60);
    }

    #[test]
    fn elapsed_time_agrees_with_tick_counts() {
        let settings = GameSettings::default();
        assert_eq!(settings.elapsed_ms(1), 16);
        assert_eq!(settings.elapsed_ms(60), 1000, "One second of ticks is one second of media time");

        for ms in [1, 17, 500, 1000, 3000, 15000] {
            let ticks = settings.ticks_for(ms);
            assert!(settings.elapsed_ms(ticks) >= ms, "{} ms delay elapses within its ticks", ms);
            assert!(settings.elapsed_ms(ticks - 1) < ms, "{} ms delay is not overshot by a tick", ms);
        }
    }

    //--- Loading ----------------------------------------------------------

    #[test]
    fn partial_file_keeps_other_defaults() {
        let file = write_temp(r#"{ "tps": 30.0, "timing": { "advance_delay_ms": 250 } }"#);
        let settings = GameSettings::load(file.path()).expect("valid settings");

        assert_eq!(settings.tps, 30.0);
        assert_eq!(settings.timing.advance_delay_ms, 250);
        assert_eq!(settings.timing.anxiety_delay_ms, 1000);
        assert_eq!(settings.text_input_max_len, 10);
    }

    #[test]
    fn media_catalog_is_loaded() {
        let file = write_temp(
            r#"{ "media": { "durations_ms": { "M_Q1": 1200 }, "missing": ["intro"] } }"#,
        );
        let settings = GameSettings::load(file.path()).expect("valid settings");

        assert_eq!(settings.media.durations_ms.get("M_Q1"), Some(&1200));
        assert_eq!(settings.media.missing, vec!["intro".to_string()]);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let file = write_temp("{ not json");
        let err = GameSettings::load(file.path()).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }), "got {:?}", err);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = GameSettings::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }), "got {:?}", err);
    }

    #[test]
    fn no_path_yields_defaults() {
        let settings = GameSettings::load_or_default(None).expect("defaults");
        assert_eq!(settings, GameSettings::default());
    }

    //--- Validation -------------------------------------------------------

    #[test]
    fn zero_tps_is_rejected() {
        let file = write_temp(r#"{ "tps": 0.0 }"#);
        let err = GameSettings::load(file.path()).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "tps", .. }), "got {:?}", err);
    }

    #[test]
    fn threshold_outside_unit_interval_is_rejected() {
        let mut settings = GameSettings::default();
        settings.timing.watchdog_threshold = 1.5;
        assert!(settings.validate().is_err());
    }
}
