//=========================================================================
// Headless Media Backend
//=========================================================================
//
// Simulated-clock implementation of `MediaBackend`.
//
// Each cue gets a duration from the settings catalog (or the default);
// `advance()` moves the clock and reports cues that ran past their end.
// Every play/stop/sound is appended to a shared `PlaybackLog` so callers
// can inspect what the game asked for.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

//=== Internal Dependencies ===============================================

use super::cue::{Cue, Sound};
use super::deck::{LoadProgress, MediaBackend, MediaError, Progress};
use crate::settings::MediaSettings;

//=== PlaybackLog =========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    Started(Cue),
    Stopped(Cue),
    Sound(Sound, f32),
}

/// Shared, append-only record of backend activity.
#[derive(Debug, Clone, Default)]
pub struct PlaybackLog(Arc<Mutex<Vec<PlaybackEvent>>>);

impl PlaybackLog {
    fn record(&self, event: PlaybackEvent) {
        if let Ok(mut events) = self.0.lock() {
            events.push(event);
        }
    }

    pub fn events(&self) -> Vec<PlaybackEvent> {
        self.0.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn started(&self) -> Vec<Cue> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PlaybackEvent::Started(cue) => Some(cue),
                _ => None,
            })
            .collect()
    }

    pub fn was_started(&self, cue: Cue) -> bool {
        self.started().contains(&cue)
    }

    pub fn sounds(&self) -> Vec<Sound> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PlaybackEvent::Sound(sound, _) => Some(sound),
                _ => None,
            })
            .collect()
    }
}

//=== HeadlessMedia =======================================================

#[derive(Debug, Clone, Copy)]
struct Clip {
    started_ms: u64,
    duration_ms: u64,
    looping: bool,
}

/// Media backend driven by a simulated clock.
#[derive(Debug)]
pub struct HeadlessMedia {
    clock_ms: u64,
    default_ms: u64,
    durations: HashMap<String, u64>,
    missing: HashSet<String>,
    playing: HashMap<Cue, Clip>,
    ended: Vec<Cue>,
    load: Option<LoadProgress>,
    log: PlaybackLog,
}

impl HeadlessMedia {
    pub fn new(settings: &MediaSettings) -> Self {
        Self {
            clock_ms: 0,
            default_ms: settings.default_cue_ms,
            durations: settings.durations_ms.clone().into_iter().collect(),
            missing: settings.missing.iter().cloned().collect(),
            playing: HashMap::new(),
            ended: Vec::new(),
            load: None,
            log: PlaybackLog::default(),
        }
    }

    /// Overrides the reported preload progress.
    pub fn with_load_progress(mut self, loaded: usize, total: usize) -> Self {
        self.load = Some(LoadProgress { loaded, total });
        self
    }

    pub fn log(&self) -> PlaybackLog {
        self.log.clone()
    }

    fn duration_of(&self, name: &str) -> u64 {
        self.durations.get(name).copied().unwrap_or(self.default_ms)
    }
}

impl MediaBackend for HeadlessMedia {
    fn play(&mut self, cue: Cue, looping: bool) -> Result<(), MediaError> {
        let name = cue.catalog_name();
        if self.missing.contains(&name) {
            return Err(MediaError::MissingAsset(name));
        }

        let clip = Clip {
            started_ms: self.clock_ms,
            duration_ms: self.duration_of(&name),
            looping,
        };
        self.playing.insert(cue, clip);
        self.ended.retain(|c| *c != cue);
        self.log.record(PlaybackEvent::Started(cue));
        Ok(())
    }

    fn play_sound(&mut self, sound: Sound, volume: f32) -> Result<(), MediaError> {
        let name = sound.catalog_name();
        if self.missing.contains(name) {
            return Err(MediaError::MissingAsset(name.to_string()));
        }
        self.log.record(PlaybackEvent::Sound(sound, volume));
        Ok(())
    }

    fn stop(&mut self, cue: Cue) {
        if self.playing.remove(&cue).is_some() {
            self.log.record(PlaybackEvent::Stopped(cue));
        }
        self.ended.retain(|c| *c != cue);
    }

    fn stop_all(&mut self) {
        let cues: Vec<Cue> = self.playing.keys().copied().collect();
        for cue in cues {
            self.stop(cue);
        }
        self.ended.clear();
    }

    fn progress(&self, cue: Cue) -> Option<Progress> {
        self.playing.get(&cue).map(|clip| Progress {
            elapsed_ms: self.clock_ms - clip.started_ms,
            duration_ms: clip.duration_ms,
        })
    }

    fn advance(&mut self, elapsed_ms: u64) {
        self.clock_ms += elapsed_ms;
        let now = self.clock_ms;

        let mut finished = Vec::new();
        for (cue, clip) in self.playing.iter_mut() {
            if now < clip.started_ms + clip.duration_ms {
                continue;
            }
            if clip.looping {
                let span = clip.duration_ms.max(1);
                let laps = (now - clip.started_ms) / span;
                clip.started_ms += laps * span;
                finished.push((*cue, true));
            } else {
                finished.push((*cue, false));
            }
        }

        for (cue, looped) in finished {
            if !looped {
                self.playing.remove(&cue);
            }
            self.ended.push(cue);
        }
    }

    fn drain_ended(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.ended)
    }

    fn load_progress(&self) -> LoadProgress {
        self.load.unwrap_or_else(|| LoadProgress::complete(self.durations.len()))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
