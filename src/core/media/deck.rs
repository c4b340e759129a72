//=========================================================================
// Media Deck
//=========================================================================
//
// Tracks which scene started which cue and turns backend "ended" reports
// into an ordered completion queue.
//
// Architecture:
//   Scene ──play(owner, cue)──→ MediaDeck ──→ MediaBackend (trait)
//                                  ↑  poll()      │
//                                  └── drain_ended / progress
//   SceneManager ←── take_completed() ── [MediaCompleted]
//
// Rules:
// - A cue that fails to start (missing asset) completes immediately, so
//   no scene waits forever on it.
// - Looping cues never complete.
// - Polled cues complete once elapsed ≥ duration − 100 ms, for backends
//   that cannot report their own end.
// - `release_owner` stops a scene's cues and drops its queued
//   completions, so nothing reaches a scene after it exits.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, VecDeque};

use log::{debug, error, trace, warn};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::cue::{Cue, Sound};
use crate::core::scene::SceneKey;

//=== Constants ===========================================================

const POLL_EARLY_MS: u64 = 100;

//=== MediaError ==========================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    /// The asset table has no backing resource for this name.
    #[error("missing media asset `{0}`")]
    MissingAsset(String),
}

//=== Progress ============================================================

/// Playback position of a cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub elapsed_ms: u64,
    pub duration_ms: u64,
}

/// Asset preloading progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadProgress {
    pub loaded: usize,
    pub total: usize,
}

impl LoadProgress {
    pub fn complete(total: usize) -> Self {
        Self { loaded: total, total }
    }

    /// Fraction in `[0, 1]`; an empty catalog counts as loaded.
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            (self.loaded as f32 / self.total as f32).min(1.0)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.loaded >= self.total
    }
}

//=== MediaBackend ========================================================

/// Host media collaborator (audio/video playback).
pub trait MediaBackend: Send {
    /// Starts (or restarts) a cue.
    fn play(&mut self, cue: Cue, looping: bool) -> Result<(), MediaError>;

    /// Fire-and-forget sound effect.
    fn play_sound(&mut self, sound: Sound, volume: f32) -> Result<(), MediaError>;

    fn stop(&mut self, cue: Cue);

    fn stop_all(&mut self);

    /// Elapsed/duration of a playing cue, if the backend knows them.
    fn progress(&self, cue: Cue) -> Option<Progress>;

    /// Advances backend time (no-op for real-time backends).
    fn advance(&mut self, _elapsed_ms: u64) {}

    /// Cues that reached their end since the last call.
    fn drain_ended(&mut self) -> Vec<Cue>;

    fn load_progress(&self) -> LoadProgress;
}

//=== MediaCompleted ======================================================

/// A finished cue and the scene that started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaCompleted<S: SceneKey> {
    pub cue: Cue,
    pub owner: S,
}

//=== MediaDeck ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Playback {
    Once,
    Looping,
    Polled,
}

#[derive(Debug, Clone, Copy)]
struct Track<S> {
    owner: S,
    playback: Playback,
}

/// Owner-aware front end over a [`MediaBackend`].
pub struct MediaDeck<S: SceneKey> {
    backend: Box<dyn MediaBackend>,
    tracks: HashMap<Cue, Track<S>>,
    completed: VecDeque<MediaCompleted<S>>,
}

impl<S: SceneKey> MediaDeck<S> {
    //--- Construction -----------------------------------------------------

    pub fn new(backend: Box<dyn MediaBackend>) -> Self {
        Self {
            backend,
            tracks: HashMap::new(),
            completed: VecDeque::new(),
        }
    }

    //--- Playback ---------------------------------------------------------

    /// Plays a cue once; its end is delivered to `owner`.
    pub fn play(&mut self, owner: S, cue: Cue) {
        self.start(owner, cue, Playback::Once);
    }

    /// Loops a cue until stopped.
    pub fn play_looping(&mut self, owner: S, cue: Cue) {
        self.start(owner, cue, Playback::Looping);
    }

    /// Plays a cue whose end is detected by polling its progress.
    pub fn play_polled(&mut self, owner: S, cue: Cue) {
        self.start(owner, cue, Playback::Polled);
    }

    /// Plays a sound effect nobody waits on.
    pub fn play_sound(&mut self, sound: Sound, volume: f32) {
        if let Err(e) = self.backend.play_sound(sound, volume) {
            warn!(target: "media", "{}", e);
        }
    }

    pub fn stop(&mut self, cue: Cue) {
        self.backend.stop(cue);
        self.tracks.remove(&cue);
        self.completed.retain(|c| c.cue != cue);
    }

    /// Stops every cue started by `owner` and forgets its pending completions.
    pub fn release_owner(&mut self, owner: S) {
        let owned: Vec<Cue> = self
            .tracks
            .iter()
            .filter(|(_, track)| track.owner == owner)
            .map(|(cue, _)| *cue)
            .collect();

        for cue in owned {
            self.backend.stop(cue);
            self.tracks.remove(&cue);
        }

        let before = self.completed.len();
        self.completed.retain(|c| c.owner != owner);
        let dropped = before - self.completed.len();
        if dropped > 0 {
            debug!(target: "media", "Dropped {} pending completions for {:?}", dropped, owner);
        }
    }

    pub fn stop_all(&mut self) {
        self.backend.stop_all();
        self.tracks.clear();
        self.completed.clear();
    }

    //--- Completion -------------------------------------------------------

    /// Entry point for host "ended" callbacks.
    pub fn notify_ended(&mut self, cue: Cue) {
        match self.tracks.get(&cue) {
            Some(track) if track.playback == Playback::Looping => {
                trace!(target: "media", "Loop of {:?} wrapped", cue);
            }
            Some(track) => {
                let owner = track.owner;
                self.tracks.remove(&cue);
                self.completed.push_back(MediaCompleted { cue, owner });
            }
            None => trace!(target: "media", "Ignoring end of untracked cue {:?}", cue),
        }
    }

    /// Advances backend time and collects finished cues.
    pub fn poll(&mut self, elapsed_ms: u64) {
        self.backend.advance(elapsed_ms);

        for cue in self.backend.drain_ended() {
            self.notify_ended(cue);
        }

        let polled: Vec<Cue> = self
            .tracks
            .iter()
            .filter(|(_, track)| track.playback == Playback::Polled)
            .map(|(cue, _)| *cue)
            .collect();

        for cue in polled {
            if let Some(progress) = self.backend.progress(cue) {
                if progress.elapsed_ms + POLL_EARLY_MS >= progress.duration_ms {
                    self.notify_ended(cue);
                }
            }
        }
    }

    /// Drains completions in the order they happened.
    pub fn take_completed(&mut self) -> Vec<MediaCompleted<S>> {
        self.completed.drain(..).collect()
    }

    //--- Query API --------------------------------------------------------

    pub fn is_playing(&self, cue: Cue) -> bool {
        self.tracks.contains_key(&cue)
    }

    pub fn progress(&self, cue: Cue) -> Option<Progress> {
        self.backend.progress(cue)
    }

    pub fn load_progress(&self) -> LoadProgress {
        self.backend.load_progress()
    }

    //--- Internal Helpers -------------------------------------------------

    fn start(&mut self, owner: S, cue: Cue, playback: Playback) {
        // A restart supersedes any completion still queued from the last run.
        self.completed.retain(|c| c.cue != cue);

        match self.backend.play(cue, playback == Playback::Looping) {
            Ok(()) => {
                debug!(target: "media", "{:?} started {:?} ({:?})", owner, cue, playback);
                self.tracks.insert(cue, Track { owner, playback });
            }
            Err(e) => {
                error!(target: "media", "{}; treating {:?} as finished", e, cue);
                self.tracks.remove(&cue);
                if playback != Playback::Looping {
                    self.completed.push_back(MediaCompleted { cue, owner });
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
